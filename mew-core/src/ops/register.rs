//! Registration of a declared type and the text operations it gains.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::helpers::case::KeyTransform;
use crate::helpers::convert::Converter;
use crate::helpers::format::{parse, render_with};
use crate::helpers::registry::ScalarRegistry;
use crate::schema::Serializable;
use crate::types::{MewError, TypeDescriptor, Value};
use crate::ops::Options;

/// A type whose schema has been validated.
///
/// Holding a `Registered<T>` is the only way to convert `T` to or from
/// text, so a type rejected by [`register`] has no conversion capability.
pub struct Registered<'r, T> {
    descriptor: Arc<TypeDescriptor>,
    registry: &'r ScalarRegistry,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Registered<'_, T> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Arc::clone(&self.descriptor),
            registry: self.registry,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Registered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registered")
            .field("type", &type_name::<T>())
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

/// Validate the schema of `T` against the process-wide scalar registry.
///
/// A type is classified and checked once per process; later calls share
/// the cached descriptor.
///
/// # Errors
///
/// * `NotSupported` - the schema graph contains an unsupported type; the
///   error lists each offending `Record.field: type`.
pub fn register<T: Serializable + 'static>() -> Result<Registered<'static, T>, MewError> {
    register_with(ScalarRegistry::global())
}

/// Validate the schema of `T` against a specific scalar registry.
pub fn register_with<T: Serializable + 'static>(
    registry: &ScalarRegistry,
) -> Result<Registered<'_, T>, MewError> {
    Ok(Registered {
        descriptor: validated::<T>()?,
        registry,
        _marker: PhantomData,
    })
}

type DescriptorCache = RwLock<HashMap<TypeId, Arc<TypeDescriptor>>>;

fn descriptors() -> &'static DescriptorCache {
    static DESCRIPTORS: OnceLock<DescriptorCache> = OnceLock::new();
    DESCRIPTORS.get_or_init(Default::default)
}

fn validated<T: Serializable + 'static>() -> Result<Arc<TypeDescriptor>, MewError> {
    let id = TypeId::of::<T>();
    if let Some(descriptor) = descriptors()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
    {
        return Ok(Arc::clone(descriptor));
    }

    let descriptor = T::describe();
    let offending = descriptor.find_unsupported();
    if !offending.is_empty() {
        log::warn!(
            "rejecting {}: unsupported types {}",
            type_name::<T>(),
            offending.join(", ")
        );
        return Err(MewError::not_supported(type_name::<T>(), offending));
    }

    log::debug!("registered {} as {}", type_name::<T>(), descriptor);
    let mut cache = descriptors().write().unwrap_or_else(PoisonError::into_inner);
    Ok(Arc::clone(cache.entry(id).or_insert_with(|| Arc::new(descriptor))))
}

impl<'r, T: Serializable> Registered<'r, T> {
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    fn converter(&self) -> Converter<'r> {
        Converter::new(self.registry)
    }

    /// Convert an instance to an intermediate value.
    pub fn to_value(&self, instance: &T, key_transform: &KeyTransform) -> Result<Value, MewError> {
        let native = instance.to_native()?;
        self.converter()
            .convert_out(&native, &self.descriptor, key_transform)
    }

    /// Convert an intermediate value to an instance.
    pub fn from_value(&self, value: &Value, key_inverse: &KeyTransform) -> Result<T, MewError> {
        let native = self
            .converter()
            .convert_in(&self.descriptor, value, key_inverse)?;
        T::from_native(native)
    }

    /// Serialize an instance to JSON or YAML text.
    pub fn to_text(&self, instance: &T, options: &Options) -> Result<String, MewError> {
        let value = self.to_value(instance, &options.key_transform)?;
        render_with(&value, options.format, options.pretty)
    }

    /// Deserialize an instance from JSON or YAML text.
    pub fn from_text(&self, text: &str, options: &Options) -> Result<T, MewError> {
        let value = parse(text, options.format)?;
        self.from_value(&value, &options.key_inverse)
    }
}

/// Serialize one instance of a registered type.
pub fn to_text<T: Serializable + 'static>(instance: &T, options: &Options) -> Result<String, MewError> {
    register::<T>()?.to_text(instance, options)
}

/// Deserialize one instance of a registered type.
pub fn from_text<T: Serializable + 'static>(text: &str, options: &Options) -> Result<T, MewError> {
    register::<T>()?.from_text(text, options)
}
