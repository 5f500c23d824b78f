//! Name resolution hooks supplied by the surrounding documentation generator

/// Maps module and method names found in `L<...>` targets to link targets.
pub trait NameResolver {
    /// Target filename for a class or module name such as `Foo::Bar`
    fn resolve_filename(&self, name: &str) -> String;

    /// Anchor name (without `#`) for a method. `Foo::bar` style references
    /// are class methods, `Foo#bar` style ones instance methods.
    fn resolve_method_anchor(&self, is_class_method: bool, method: &str) -> String;
}

impl<R: NameResolver + ?Sized> NameResolver for &R {
    fn resolve_filename(&self, name: &str) -> String {
        (**self).resolve_filename(name)
    }

    fn resolve_method_anchor(&self, is_class_method: bool, method: &str) -> String {
        (**self).resolve_method_anchor(is_class_method, method)
    }
}

/// Adapts a pair of closures to [`NameResolver`]
pub struct FnResolver<F, M> {
    filename: F,
    method_anchor: M,
}

impl<F, M> FnResolver<F, M>
where
    F: Fn(&str) -> String,
    M: Fn(bool, &str) -> String,
{
    pub fn new(filename: F, method_anchor: M) -> Self {
        FnResolver {
            filename,
            method_anchor,
        }
    }
}

impl<F, M> NameResolver for FnResolver<F, M>
where
    F: Fn(&str) -> String,
    M: Fn(bool, &str) -> String,
{
    fn resolve_filename(&self, name: &str) -> String {
        (self.filename)(name)
    }

    fn resolve_method_anchor(&self, is_class_method: bool, method: &str) -> String {
        (self.method_anchor)(is_class_method, method)
    }
}

/// Resolver used when no generator is involved: `Foo::Bar` becomes
/// `Foo/Bar.html`, methods become `method-name` or `classmethod-name`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl NameResolver for DefaultResolver {
    fn resolve_filename(&self, name: &str) -> String {
        format!("{}.html", name.replace("::", "/"))
    }

    fn resolve_method_anchor(&self, is_class_method: bool, method: &str) -> String {
        if is_class_method {
            format!("classmethod-{}", method)
        } else {
            format!("method-{}", method)
        }
    }
}
