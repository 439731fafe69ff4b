use super::result::ValidationResult;
use super::rules::Rule;

/// Validates a whole object, reporting into a shared result
pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, target: &T, result: &mut ValidationResult);
}

/// Runs a list of rules against one projected field
pub struct Field<T: ?Sized, V: ?Sized> {
    name: &'static str,
    accessor: Box<dyn for<'a> Fn(&'a T) -> &'a V + Send + Sync>,
    rules: Vec<Box<dyn Rule<V>>>,
}

impl<T: ?Sized + 'static, V: ?Sized + 'static> Field<T, V> {
    pub fn new<F>(name: &'static str, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
    {
        Self {
            name,
            accessor: Box::new(accessor),
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: impl Rule<V> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }
}

impl<T: ?Sized, V: ?Sized> Validator<T> for Field<T, V> {
    fn validate(&self, target: &T, result: &mut ValidationResult) {
        let value = (self.accessor)(target);
        for rule in &self.rules {
            if let Some(message) = rule.check(value) {
                result.push(self.name, message);
            }
        }
    }
}

/// Like `Field`, but an absent value passes every rule
pub struct OptionalField<T: ?Sized, V: ?Sized> {
    name: &'static str,
    accessor: Box<dyn for<'a> Fn(&'a T) -> Option<&'a V> + Send + Sync>,
    rules: Vec<Box<dyn Rule<V>>>,
}

impl<T: ?Sized + 'static, V: ?Sized + 'static> OptionalField<T, V> {
    pub fn new<F>(name: &'static str, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> Option<&'a V> + Send + Sync + 'static,
    {
        Self {
            name,
            accessor: Box::new(accessor),
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: impl Rule<V> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }
}

impl<T: ?Sized, V: ?Sized> Validator<T> for OptionalField<T, V> {
    fn validate(&self, target: &T, result: &mut ValidationResult) {
        let Some(value) = (self.accessor)(target) else {
            return;
        };
        for rule in &self.rules {
            if let Some(message) = rule.check(value) {
                result.push(self.name, message);
            }
        }
    }
}

struct Check<T: ?Sized> {
    field: &'static str,
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
    message: &'static str,
}

impl<T: ?Sized> Validator<T> for Check<T> {
    fn validate(&self, target: &T, result: &mut ValidationResult) {
        if !(self.predicate)(target) {
            result.push(self.field, self.message);
        }
    }
}

struct When<T: ?Sized> {
    condition: Box<dyn Fn(&T) -> bool + Send + Sync>,
    inner: Box<dyn Validator<T>>,
}

impl<T: ?Sized> Validator<T> for When<T> {
    fn validate(&self, target: &T, result: &mut ValidationResult) {
        if (self.condition)(target) {
            self.inner.validate(target, result);
        }
    }
}

/// Ordered composition of validators
///
/// All members run; a chain is itself a `Validator` and nests.
pub struct ValidatorChain<T: ?Sized> {
    validators: Vec<Box<dyn Validator<T>>>,
}

impl<T: ?Sized + 'static> ValidatorChain<T> {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    pub fn with(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Cross-field rule reported against `field`
    pub fn check<F>(mut self, field: &'static str, predicate: F, message: &'static str) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.validators.push(Box::new(Check {
            field,
            predicate: Box::new(predicate),
            message,
        }));
        self
    }

    /// Run `validator` only when `condition` holds for the target
    pub fn when<F>(mut self, condition: F, validator: impl Validator<T> + 'static) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.validators.push(Box::new(When {
            condition: Box::new(condition),
            inner: Box::new(validator),
        }));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Convenience wrapper returning a fresh result
    pub fn run(&self, target: &T) -> ValidationResult {
        let mut result = ValidationResult::new();
        self.validate(target, &mut result);
        result
    }
}

impl<T: ?Sized + 'static> Default for ValidatorChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Validator<T> for ValidatorChain<T> {
    fn validate(&self, target: &T, result: &mut ValidationResult) {
        for validator in &self.validators {
            validator.validate(target, result);
        }
    }
}
