//! Capability matrix of `(module, action)` pairs per operator role.
//!
//! Everything not explicitly granted is denied. Matrices are parsed from
//! configuration and rejected at load time if they name unknown modules or
//! actions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// Application area a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Dashboard,
    Sales,
    Products,
    Inventory,
    CashDrawer,
    Employees,
}

impl Module {
    pub const ALL: [Module; 6] = [
        Module::Dashboard,
        Module::Sales,
        Module::Products,
        Module::Inventory,
        Module::CashDrawer,
        Module::Employees,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Sales => "sales",
            Module::Products => "products",
            Module::Inventory => "inventory",
            Module::CashDrawer => "cash_drawer",
            Module::Employees => "employees",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown permission module: {}", s))
    }
}

/// Operation performed within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("Unknown permission action: {}", s))
    }
}

/// Set of granted `(module, action)` pairs; anything absent is denied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    granted: BTreeSet<(Module, Action)>,
}

impl PermissionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every action on every module
    pub fn full() -> Self {
        let mut matrix = Self::new();
        for module in Module::ALL {
            for action in Action::ALL {
                matrix.grant(module, action);
            }
        }
        matrix
    }

    pub fn grant(&mut self, module: Module, action: Action) -> &mut Self {
        self.granted.insert((module, action));
        self
    }

    pub fn is_allowed(&self, module: Module, action: Action) -> bool {
        self.granted.contains(&(module, action))
    }

    /// Parse `{"<module>": ["<action>", ...]}`, rejecting unknown names
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| "permission matrix must be a JSON object".to_string())?;

        let mut matrix = Self::new();
        for (module_name, actions) in object {
            let module: Module = module_name.parse()?;
            let actions = actions
                .as_array()
                .ok_or_else(|| format!("actions for '{}' must be an array", module_name))?;

            for action in actions {
                let action_name = action
                    .as_str()
                    .ok_or_else(|| format!("actions for '{}' must be strings", module_name))?;
                matrix.grant(module, action_name.parse()?);
            }
        }

        Ok(matrix)
    }
}

/// Named roles and their permission matrices
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: HashMap<String, PermissionMatrix>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in roles used when no configuration is supplied
    pub fn builtin() -> Self {
        let mut cashier = PermissionMatrix::new();
        cashier
            .grant(Module::Dashboard, Action::Read)
            .grant(Module::CashDrawer, Action::Read)
            .grant(Module::CashDrawer, Action::Create)
            .grant(Module::Sales, Action::Read)
            .grant(Module::Sales, Action::Create);

        Self::new()
            .with_role("admin", PermissionMatrix::full())
            .with_role("cashier", cashier)
    }

    pub fn with_role(mut self, name: impl Into<String>, matrix: PermissionMatrix) -> Self {
        self.roles.insert(name.into(), matrix);
        self
    }

    pub fn get(&self, role: &str) -> Option<&PermissionMatrix> {
        self.roles.get(role)
    }

    /// Unknown roles are denied everything
    pub fn is_allowed(&self, role: &str, module: Module, action: Action) -> bool {
        self.get(role)
            .map(|matrix| matrix.is_allowed(module, action))
            .unwrap_or(false)
    }

    /// Parse `{"<role>": {"<module>": ["<action>", ...]}}`
    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| format!("invalid role permissions JSON: {}", e))?;
        let object = value
            .as_object()
            .ok_or_else(|| "role permissions must be a JSON object".to_string())?;

        let mut registry = Self::new();
        for (role, matrix) in object {
            let matrix = PermissionMatrix::from_json(matrix)
                .map_err(|e| format!("role '{}': {}", role, e))?;
            registry.roles.insert(role.clone(), matrix);
        }

        Ok(registry)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
