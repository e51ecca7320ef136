//! Name-based lookup of the shipped integrators
//!
//! Each integrator describes itself (name, aliases, order). The registry
//! indexes boxed instances under every name and hands out fresh clones, so
//! configuration files and the command line can pick a method by string.

use super::Integrator;
use std::collections::{HashMap, HashSet};

/// Maps canonical names and aliases to integrator instances
pub struct IntegratorRegistry {
    integrators: HashMap<String, Box<dyn Integrator>>,
}

impl IntegratorRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            integrators: HashMap::new(),
        }
    }

    /// Registers every integrator that ships with the crate.
    pub fn with_standard_integrators(mut self) -> Self {
        use super::{ExplicitEuler, Heun, RungeKuttaFourthOrder};

        self.register_integrator(Box::new(ExplicitEuler));
        self.register_integrator(Box::new(Heun));
        self.register_integrator(Box::new(RungeKuttaFourthOrder));

        self
    }

    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.register_integrator(integrator);
        self
    }

    pub fn register_integrator(&mut self, integrator: Box<dyn Integrator>) {
        for alias in integrator.aliases() {
            self.integrators
                .insert(alias.to_string(), integrator.clone_box());
        }

        self.integrators
            .insert(integrator.name().to_string(), integrator);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Integrator>, String> {
        self.integrators
            .get(name)
            .map(|integrator| integrator.clone_box())
            .ok_or_else(|| {
                let alias_names: Vec<String> =
                    self.list_aliases().into_iter().map(|(a, _)| a).collect();
                format!(
                    "Unknown integrator: '{}'. Available integrators: {}. Aliases: {}",
                    name,
                    self.list_available().join(", "),
                    alias_names.join(", ")
                )
            })
    }

    /// Canonical names, sorted
    pub fn list_available(&self) -> Vec<String> {
        let canonical: HashSet<&str> = self.integrators.values().map(|i| i.name()).collect();

        let mut names: Vec<String> = canonical.into_iter().map(str::to_string).collect();
        names.sort();
        names
    }

    /// `(alias, canonical name)` pairs, sorted by alias
    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = self
            .integrators
            .iter()
            .filter(|(key, integrator)| key.as_str() != integrator.name())
            .map(|(key, integrator)| (key.clone(), integrator.name().to_string()))
            .collect();

        aliases.sort_by(|a, b| a.0.cmp(&b.0));
        aliases
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new().with_standard_integrators()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::integrators::{TendencyField, Workspace};
    use crate::physics::math::Scalar;

    #[derive(Debug, Clone)]
    struct TestIntegratorA;

    impl Integrator for TestIntegratorA {
        fn clone_box(&self) -> Box<dyn Integrator> {
            Box::new(self.clone())
        }

        fn step(&self, _: &mut [Scalar], _: &dyn TendencyField, _: Scalar, _: &mut Workspace) {}

        fn convergence_order(&self) -> usize {
            2
        }

        fn imaginary_axis_gain(&self, _: Scalar) -> Scalar {
            1.0
        }

        fn name(&self) -> &'static str {
            "test_a"
        }

        fn aliases(&self) -> Vec<&'static str> {
            vec!["ta", "test_alias_a"]
        }
    }

    #[derive(Debug, Clone)]
    struct TestIntegratorNoAlias;

    impl Integrator for TestIntegratorNoAlias {
        fn clone_box(&self) -> Box<dyn Integrator> {
            Box::new(self.clone())
        }

        fn step(&self, _: &mut [Scalar], _: &dyn TendencyField, _: Scalar, _: &mut Workspace) {}

        fn convergence_order(&self) -> usize {
            1
        }

        fn imaginary_axis_gain(&self, _: Scalar) -> Scalar {
            1.0
        }

        fn name(&self) -> &'static str {
            "no_alias"
        }
    }

    #[test]
    fn test_alias_resolution() {
        let registry = IntegratorRegistry::new().with_integrator(Box::new(TestIntegratorA));

        for name in ["test_a", "ta", "test_alias_a"] {
            let integrator = registry.create(name).unwrap();
            assert_eq!(integrator.name(), "test_a");
            assert_eq!(integrator.convergence_order(), 2);
        }

        assert_eq!(registry.list_available(), vec!["test_a".to_string()]);
        assert_eq!(
            registry.list_aliases(),
            vec![
                ("ta".to_string(), "test_a".to_string()),
                ("test_alias_a".to_string(), "test_a".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_aliases_integrator() {
        let registry = IntegratorRegistry::new().with_integrator(Box::new(TestIntegratorNoAlias));
        assert!(registry.create("no_alias").is_ok());
        assert!(registry.list_aliases().is_empty());
    }

    #[test]
    fn test_unknown_integrator_error() {
        let registry = IntegratorRegistry::default();
        let error = registry.create("leapfrog").unwrap_err();
        assert!(error.contains("Unknown integrator: 'leapfrog'"));
        assert!(error.contains("explicit_euler"));
        assert!(error.contains("forward_euler"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = IntegratorRegistry::new();
        assert!(registry.list_available().is_empty());
        assert!(registry.list_aliases().is_empty());
        assert!(registry.create("explicit_euler").is_err());
    }

    #[test]
    fn test_case_sensitivity() {
        let registry = IntegratorRegistry::default();
        assert!(registry.create("RK4").is_err());
        assert!(registry.create("rk4").is_ok());
    }

    #[test]
    fn test_standard_registry_contents() {
        let registry = IntegratorRegistry::default();
        assert_eq!(
            registry.list_available(),
            vec!["explicit_euler", "heun", "rk4"]
        );

        let orders: Vec<usize> = registry
            .list_available()
            .iter()
            .map(|name| registry.create(name).unwrap().convergence_order())
            .collect();
        assert_eq!(orders, vec![1, 2, 4]);

        for (alias, canonical) in registry.list_aliases() {
            assert_eq!(registry.create(&alias).unwrap().name(), canonical);
        }
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = IntegratorRegistry::new()
            .with_integrator(Box::new(TestIntegratorA))
            .with_integrator(Box::new(TestIntegratorA));
        assert_eq!(registry.list_available().len(), 1);
        assert_eq!(registry.list_aliases().len(), 2);
    }
}
