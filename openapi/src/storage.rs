#![deny(missing_docs)]

//! # Metadata Storage
//!
//! Owns every registered route fact. Registration appends at startup;
//! generation reads; [`MetadataStorage::reset`] is the only destructive
//! operation and must not run concurrently with generation.

use crate::metadata::{ActionFact, ControllerFact, ParamFact, ResponseHandlerFact};

/// Storage for all registered route facts.
#[derive(Debug, Default)]
pub struct MetadataStorage {
    /// Registered controller facts.
    pub controllers: Vec<ControllerFact>,
    /// Registered action facts.
    pub actions: Vec<ActionFact>,
    /// Registered parameter facts.
    pub params: Vec<ParamFact>,
    /// Registered response handler facts.
    pub response_handlers: Vec<ResponseHandlerFact>,
}

impl MetadataStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a controller fact.
    pub fn add_controller(&mut self, fact: ControllerFact) {
        self.controllers.push(fact);
    }

    /// Appends an action fact.
    pub fn add_action(&mut self, fact: ActionFact) {
        self.actions.push(fact);
    }

    /// Appends a parameter fact.
    pub fn add_param(&mut self, fact: ParamFact) {
        self.params.push(fact);
    }

    /// Appends a response handler fact.
    pub fn add_response_handler(&mut self, fact: ResponseHandlerFact) {
        self.response_handlers.push(fact);
    }

    /// Filters registered controllers by a set of target names.
    pub fn filter_controllers_for_targets(&self, targets: &[&str]) -> Vec<&ControllerFact> {
        self.controllers
            .iter()
            .filter(|ctrl| targets.iter().any(|t| *t == ctrl.target))
            .collect()
    }

    /// Filters parameters by target and method.
    pub fn filter_params_with_target_and_method(
        &self,
        target: &str,
        method: &str,
    ) -> Vec<&ParamFact> {
        self.params
            .iter()
            .filter(|param| param.target == target && param.method == method)
            .collect()
    }

    /// Filters registered actions by target.
    pub fn filter_actions_with_target(&self, target: &str) -> Vec<&ActionFact> {
        self.actions
            .iter()
            .filter(|action| action.target == target)
            .collect()
    }

    /// Filters response handlers by target.
    pub fn filter_response_handlers_with_target(&self, target: &str) -> Vec<&ResponseHandlerFact> {
        self.response_handlers
            .iter()
            .filter(|handler| handler.target == target)
            .collect()
    }

    /// Filters response handlers by target and method.
    pub fn filter_response_handlers_with_target_and_method(
        &self,
        target: &str,
        method: &str,
    ) -> Vec<&ResponseHandlerFact> {
        self.response_handlers
            .iter()
            .filter(|handler| {
                handler.target == target && handler.method.as_deref() == Some(method)
            })
            .collect()
    }

    /// Removes all saved metadata.
    pub fn reset(&mut self) {
        self.controllers.clear();
        self.params.clear();
        self.response_handlers.clear();
        self.actions.clear();
    }
}
