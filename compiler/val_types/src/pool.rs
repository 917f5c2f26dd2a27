//! Deduplicating type storage.
//!
//! [`TypePool`] interns [`Type`] values and hands out [`TypeId`] handles;
//! interning the same type twice yields the same handle, so type equality is
//! an index compare. Builtins occupy the fixed indices named by the `TypeId`
//! constants.

#![allow(clippy::format_push_string)] // Diagnostic formatting prioritizes clarity over allocation

use std::ops::Index;

use rustc_hash::FxHashMap;
use val_ir::ast::AccessEffect;
use val_ir::stack::ensure_sufficient_stack;
use val_ir::{Ast, StringInterner};

use crate::ty::{BuiltinType, CallableParameter, Type, TypeId};

/// Interned types.
#[derive(Clone, Debug)]
pub struct TypePool {
    types: Vec<Type>,
    map: FxHashMap<Type, TypeId>,
}

impl TypePool {
    /// Create a pool holding only the builtin types.
    pub fn new() -> Self {
        let mut pool = TypePool {
            types: Vec::with_capacity(64),
            map: FxHashMap::default(),
        };

        // Order matches the `TypeId` constants.
        let builtins = [
            Type::Builtin(BuiltinType::Void),   // 0 = TypeId::VOID
            Type::Builtin(BuiltinType::Never),  // 1 = TypeId::NEVER
            Type::Builtin(BuiltinType::Bool),   // 2 = TypeId::BOOL
            Type::Builtin(BuiltinType::Int),    // 3 = TypeId::INT
            Type::Builtin(BuiltinType::Float),  // 4 = TypeId::FLOAT
            Type::Builtin(BuiltinType::String), // 5 = TypeId::STRING
            Type::Error,                        // 6 = TypeId::ERROR
        ];
        for ty in builtins {
            pool.intern(ty);
        }
        pool
    }

    /// Intern `ty`, returning the existing handle if it is already present.
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.map.get(&ty) {
            return id;
        }
        let raw = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("type pool overflow: more than u32::MAX types"));
        let id = TypeId::from_raw(raw);
        self.types.push(ty.clone());
        self.map.insert(ty, id);
        id
    }

    /// The type denoted by `id`, or `None` if `id` belongs to another pool.
    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.index())
    }

    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.types.len()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always `false`: builtins are interned on creation.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Render `id` as written in source, for diagnostics.
    ///
    /// A type that contains itself renders the inner occurrence as `<cycle>`.
    pub fn display(&self, id: TypeId, ast: &Ast, interner: &StringInterner) -> String {
        let mut writer = TypeWriter {
            pool: self,
            ast,
            interner,
            buf: String::new(),
            open: Vec::new(),
        };
        writer.write(id);
        writer.buf
    }
}

/// Renders types into a buffer, tracking the types currently being rendered.
struct TypeWriter<'a> {
    pool: &'a TypePool,
    ast: &'a Ast,
    interner: &'a StringInterner,
    buf: String,
    open: Vec<TypeId>,
}

impl TypeWriter<'_> {
    fn write(&mut self, id: TypeId) {
        let pool = self.pool;
        let Some(ty) = pool.get(id) else {
            self.buf.push_str("<foreign type>");
            return;
        };
        if self.open.contains(&id) {
            self.buf.push_str("<cycle>");
            return;
        }
        self.open.push(id);
        ensure_sufficient_stack(|| self.write_type(ty));
        self.open.pop();
    }

    fn write_type(&mut self, ty: &Type) {
        let (ast, interner) = (self.ast, self.interner);
        match ty {
            Type::Builtin(builtin) => self.buf.push_str(builtin.name()),
            Type::Module(decl) => {
                self.buf.push_str("module ");
                match ast.get(*decl) {
                    Some(module) => self.buf.push_str(interner.lookup(module.name)),
                    None => self.buf.push('?'),
                }
            }
            Type::Product(decl) => match ast.get(*decl) {
                Some(product) => self.buf.push_str(interner.lookup(product.name)),
                None => self.buf.push('?'),
            },
            Type::Trait(trait_type) => match ast.get(trait_type.decl) {
                Some(decl) => self.buf.push_str(interner.lookup(decl.name)),
                None => self.buf.push('?'),
            },
            Type::GenericParameter(decl) => match ast.get(*decl) {
                Some(parameter) => self.buf.push_str(interner.lookup(parameter.name)),
                None => self.buf.push('?'),
            },
            Type::Tuple(elements) => {
                self.buf.push('{');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.buf.push_str(", ");
                    }
                    if let Some(label) = element.label {
                        self.buf.push_str(interner.lookup(label));
                        self.buf.push_str(": ");
                    }
                    self.write(element.ty);
                }
                self.buf.push('}');
            }
            Type::Lambda(lambda) => {
                if lambda.environment != TypeId::VOID {
                    self.buf.push('[');
                    self.write(lambda.environment);
                    self.buf.push_str("] ");
                }
                self.write_inputs(&lambda.inputs);
                self.buf.push_str(" -> ");
                self.write(lambda.output);
            }
            Type::Subscript(subscript) => {
                self.buf.push_str("subscript ");
                self.write_inputs(&subscript.inputs);
                self.buf.push_str(": ");
                self.write(subscript.output);
                self.buf.push_str(" { ");
                let effects: Vec<&str> =
                    subscript.capabilities.iter().map(|e| e.keyword()).collect();
                self.buf.push_str(&effects.join(", "));
                self.buf.push_str(" }");
            }
            Type::Error => self.buf.push_str("<error>"),
        }
    }

    fn write_inputs(&mut self, inputs: &[CallableParameter]) {
        self.buf.push('(');
        for (i, input) in inputs.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            if let Some(label) = input.label {
                self.buf.push_str(self.interner.lookup(label));
                self.buf.push_str(": ");
            }
            if input.convention != AccessEffect::Let {
                self.buf.push_str(input.convention.keyword());
                self.buf.push(' ');
            }
            self.write(input.ty);
        }
        self.buf.push(')');
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<TypeId> for TypePool {
    type Output = Type;

    /// # Panics
    ///
    /// Panics if `id` was not interned by this pool.
    fn index(&self, id: TypeId) -> &Type {
        self.get(id)
            .unwrap_or_else(|| panic!("{id:?} does not belong to this type pool"))
    }
}
