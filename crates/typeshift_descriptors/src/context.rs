//! The descriptor context: a name-qualified registry with deferred
//! generic-constraint resolution.
//!
//! Registration and finalization are two strictly separated phases.
//! Constraints discovered during registration go into a pending map;
//! [`DescriptorContext::initialize_constraints`] applies them all at once
//! and must run exactly once, after every declaration has registered.

use crate::descriptor::{
    ClassDescriptor, ClassDescriptorId, MethodDescriptor, PropertyDescriptor, TypeAliasDescriptor,
    TypeParameterDescriptor, TypeParameterId,
};
use rustc_hash::{FxHashMap, FxHashSet};
use typeshift_ast::node::TypeNode;
use typeshift_core::collections::MultiMap;
use typeshift_core::name::NameEntity;

#[derive(Debug, Default)]
pub struct DescriptorContext {
    /// Qualifier applied to class names registered from the current root.
    pub current_package: Option<NameEntity>,

    classes: Vec<ClassDescriptor>,
    class_index: FxHashMap<NameEntity, ClassDescriptorId>,
    resolved: FxHashSet<ClassDescriptorId>,

    type_aliases: Vec<TypeAliasDescriptor>,
    alias_index: FxHashMap<NameEntity, usize>,

    methods: FxHashMap<NameEntity, MethodDescriptor>,
    properties: FxHashMap<NameEntity, PropertyDescriptor>,

    type_parameters: Vec<TypeParameterDescriptor>,
    type_parameter_index: FxHashMap<NameEntity, TypeParameterId>,
    pending_constraints: MultiMap<TypeParameterId, TypeNode>,
    finalized: bool,
}

impl DescriptorContext {
    pub fn new() -> Self {
        DescriptorContext::default()
    }

    /// Qualify a declared name with the current package, when one is set.
    pub fn qualify(&self, name: &NameEntity) -> NameEntity {
        match &self.current_package {
            Some(package) => package.append_left(name),
            None => name.clone(),
        }
    }

    // -- Class-like descriptors --

    /// Register a class-like descriptor under its fully-qualified name.
    /// Re-registering the same name replaces the record but keeps the id,
    /// so resolution state survives re-registration.
    pub fn register_class(&mut self, descriptor: ClassDescriptor) -> ClassDescriptorId {
        let fq_name = self.qualify(&descriptor.name);
        if let Some(&id) = self.class_index.get(&fq_name) {
            self.classes[id.0 as usize] = descriptor;
            return id;
        }
        let id = ClassDescriptorId(self.classes.len() as u32);
        self.classes.push(descriptor);
        self.class_index.insert(fq_name, id);
        id
    }

    pub fn class_by_name(&self, fq_name: &NameEntity) -> Option<ClassDescriptorId> {
        self.class_index.get(fq_name).copied()
    }

    pub fn class(&self, id: ClassDescriptorId) -> &ClassDescriptor {
        &self.classes[id.0 as usize]
    }

    pub fn all_classes(&self) -> impl Iterator<Item = ClassDescriptorId> + '_ {
        (0..self.classes.len() as u32).map(ClassDescriptorId)
    }

    /// Mark a class hierarchy as resolved.
    pub fn add_resolved(&mut self, id: ClassDescriptorId) {
        self.resolved.insert(id);
    }

    /// Whether a class still needs hierarchy resolution: registered and not
    /// yet marked resolved. Guards recursive resolution against cyclic
    /// inheritance references.
    pub fn should_be_resolved(&self, id: ClassDescriptorId) -> bool {
        (id.0 as usize) < self.classes.len() && !self.resolved.contains(&id)
    }

    // -- Type aliases --

    pub fn register_type_alias(&mut self, descriptor: TypeAliasDescriptor) {
        let index = self.type_aliases.len();
        self.alias_index.insert(descriptor.name.clone(), index);
        self.type_aliases.push(descriptor);
    }

    pub fn type_alias_by_name(&self, name: &NameEntity) -> Option<&TypeAliasDescriptor> {
        self.alias_index
            .get(name)
            .map(|&index| &self.type_aliases[index])
    }

    /// Reverse lookup: the first alias whose underlying type is `aliased`.
    pub fn type_alias_by_aliased(&self, aliased: &TypeNode) -> Option<&TypeAliasDescriptor> {
        self.type_aliases
            .iter()
            .find(|descriptor| &descriptor.aliased == aliased)
    }

    // -- Members --

    pub fn register_method(&mut self, method_fq_name: NameEntity, descriptor: MethodDescriptor) {
        self.methods.insert(method_fq_name, descriptor);
    }

    pub fn resolve_method(
        &self,
        class_fq_name: &NameEntity,
        method_name: &NameEntity,
    ) -> Option<&MethodDescriptor> {
        self.methods.get(&class_fq_name.append_left(method_name))
    }

    pub fn register_property(
        &mut self,
        property_fq_name: NameEntity,
        descriptor: PropertyDescriptor,
    ) {
        self.properties.insert(property_fq_name, descriptor);
    }

    pub fn resolve_property(
        &self,
        class_fq_name: &NameEntity,
        property_name: &NameEntity,
    ) -> Option<&PropertyDescriptor> {
        self.properties.get(&class_fq_name.append_left(property_name))
    }

    // -- Type parameters and deferred constraints --

    pub fn register_type_parameter(
        &mut self,
        descriptor: TypeParameterDescriptor,
    ) -> TypeParameterId {
        let id = TypeParameterId(self.type_parameters.len() as u32);
        self.type_parameter_index.insert(descriptor.name.clone(), id);
        self.type_parameters.push(descriptor);
        id
    }

    pub fn type_parameter_by_name(&self, name: &NameEntity) -> Option<TypeParameterId> {
        self.type_parameter_index.get(name).copied()
    }

    /// Drop a parameter from name lookup once its scope closes. The record
    /// itself stays addressable by id.
    pub fn remove_type_parameter(&mut self, name: &NameEntity) {
        self.type_parameter_index.remove(name);
    }

    pub fn type_parameter(&self, id: TypeParameterId) -> &TypeParameterDescriptor {
        &self.type_parameters[id.0 as usize]
    }

    /// Defer an upper-bound constraint until finalization. Deferring after
    /// finalization would lose the constraint silently, so it is a
    /// programming error.
    pub fn defer_constraint(&mut self, id: TypeParameterId, constraint: TypeNode) {
        assert!(
            !self.finalized,
            "constraint deferred after initialize_constraints has run"
        );
        self.pending_constraints.add(id, constraint);
    }

    /// Whether a type parameter can be initialized now: true iff it has no
    /// pending constraints outstanding.
    pub fn can_be_initialized(&self, id: TypeParameterId) -> bool {
        !self.pending_constraints.contains_key(&id)
    }

    /// Apply every pending constraint list as upper bounds and mark the
    /// affected parameters initialized. Runs exactly once, after all
    /// registration.
    pub fn initialize_constraints(&mut self) {
        assert!(
            !self.finalized,
            "initialize_constraints must run exactly once"
        );
        self.finalized = true;
        tracing::debug!(
            pending = self.pending_constraints.len(),
            "applying deferred type-parameter constraints"
        );
        for (id, constraints) in self.pending_constraints.drain() {
            let descriptor = &mut self.type_parameters[id.0 as usize];
            descriptor.upper_bounds.extend(constraints);
            descriptor.initialized = true;
        }
    }
}
