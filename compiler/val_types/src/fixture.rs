//! A small checked program shared by unit tests.
//!
//! ```text
//! module Main
//!   fun +(l, r)
//!   fun f(p)[let a = 1] {
//!     let v = p
//!     v
//!     { v }
//!     [1 + 2: true]
//!   }
//!   subscript s(self) { let { self } inout { self } }
//! ```

use val_ir::ast::{
    AccessEffect, BindingDecl, BindingDeclId, BindingIntroducer, BindingPattern,
    BooleanLiteralExpr, BraceStmt, BraceStmtId, DeclStmt, ExprStmt, FunctionBody, FunctionDecl,
    FunctionDeclId, IntegerLiteralExpr, LambdaExpr, LambdaExprId, MapElement, MapLiteralExpr,
    MapLiteralExprId, ModuleDecl, ModuleDeclId, NameExpr, NameExprDomain, NameExprId,
    NamePattern, ParameterDecl, ParameterDeclId, SequenceElement, SequenceExpr, SequenceExprId,
    SubscriptDecl, SubscriptDeclId, SubscriptImpl, SubscriptImplId, TranslationUnit,
    TranslationUnitId, VarDecl, VarDeclId,
};
use val_ir::{
    AnyDeclId, AnyExprId, Ast, Name, ScopedProgram, Span, StmtIdentity, StringInterner,
};

use crate::builder::ProgramBuilder;
use crate::pool::TypePool;
use crate::tables::{CaptureMode, DeclReference, FoldedSequenceExpr, ImplicitCapture, PrecedenceGroup};
use crate::ty::{Type, TypeId};

pub(crate) struct Sample {
    pub interner: StringInterner,
    pub module: ModuleDeclId,
    pub unit: TranslationUnitId,
    pub plus: FunctionDeclId,
    pub function: FunctionDeclId,
    pub parameter: ParameterDeclId,
    pub capture: BindingDeclId,
    pub body: BraceStmtId,
    pub binding: BindingDeclId,
    pub var: VarDeclId,
    pub use_p: NameExprId,
    pub use_v: NameExprId,
    pub lambda_expr: LambdaExprId,
    pub lambda: FunctionDeclId,
    pub inner: NameExprId,
    pub map: MapLiteralExprId,
    pub sequence: SequenceExprId,
    pub operator: NameExprId,
    pub subscript: SubscriptDeclId,
    pub receiver: ParameterDeclId,
    pub impls: [SubscriptImplId; 2],
    pub self_uses: [NameExprId; 2],
}

fn name_expr(ast: &mut Ast, name: Name) -> NameExprId {
    ast.insert(NameExpr { domain: NameExprDomain::None, name }, Span::DUMMY)
}

fn let_binding(
    ast: &mut Ast,
    name: Name,
    initializer: Option<AnyExprId>,
) -> (BindingDeclId, VarDeclId) {
    let var = ast.insert(VarDecl { name }, Span::DUMMY);
    let pattern = ast.insert(NamePattern { decl: var }, Span::DUMMY);
    let pattern = ast.insert(
        BindingPattern { introducer: BindingIntroducer::Let, subpattern: pattern.into() },
        Span::DUMMY,
    );
    let binding = ast.insert(BindingDecl { pattern, initializer }, Span::DUMMY);
    (binding, var)
}

fn parameter(ast: &mut Ast, name: Name) -> ParameterDeclId {
    ast.insert(ParameterDecl { label: None, name, convention: AccessEffect::Let }, Span::DUMMY)
}

fn function_decl(
    name: Option<Name>,
    explicit_captures: Vec<BindingDeclId>,
    receiver: Option<ParameterDeclId>,
    parameters: Vec<ParameterDeclId>,
    body: Option<FunctionBody>,
) -> FunctionDecl {
    FunctionDecl {
        name,
        generic_parameters: Vec::new(),
        explicit_captures,
        receiver,
        parameters,
        body,
    }
}

fn integer(ast: &mut Ast, interner: &StringInterner, text: &str) -> AnyExprId {
    ast.insert(IntegerLiteralExpr { value: interner.intern(text) }, Span::DUMMY).into()
}

/// The syntax of the sample, scoped but not yet typed.
pub(crate) fn syntax() -> (ScopedProgram, Sample) {
    let interner = StringInterner::new();
    let n = |s: &str| interner.intern(s);
    let mut ast = Ast::new();

    let l = parameter(&mut ast, n("l"));
    let r = parameter(&mut ast, n("r"));
    let plus = ast.insert(function_decl(Some(n("+")), Vec::new(), None, vec![l, r], None), Span::new(0, 10));

    let one = integer(&mut ast, &interner, "1");
    let (capture, _) = let_binding(&mut ast, n("a"), Some(one));
    let use_p = name_expr(&mut ast, n("p"));
    let (binding, var) = let_binding(&mut ast, n("v"), Some(use_p.into()));
    let use_v = name_expr(&mut ast, n("v"));
    let inner = name_expr(&mut ast, n("v"));
    let lambda = ast.insert(
        function_decl(None, Vec::new(), None, Vec::new(), Some(FunctionBody::Expr(inner.into()))),
        Span::DUMMY,
    );
    let lambda_expr = ast.insert(LambdaExpr { decl: lambda }, Span::DUMMY);

    let lhs = integer(&mut ast, &interner, "1");
    let operator = name_expr(&mut ast, n("+"));
    let rhs = integer(&mut ast, &interner, "2");
    let sequence = ast.insert(
        SequenceExpr { head: lhs, tail: vec![SequenceElement { operator, operand: rhs }] },
        Span::DUMMY,
    );
    let value = ast.insert(BooleanLiteralExpr { value: true }, Span::DUMMY);
    let map = ast.insert(
        MapLiteralExpr { elements: vec![MapElement { key: sequence.into(), value: value.into() }] },
        Span::DUMMY,
    );

    let stmts = vec![
        ast.insert(DeclStmt { decl: binding.into() }, Span::DUMMY).to_stmt(),
        ast.insert(ExprStmt { expr: use_v.into() }, Span::DUMMY).to_stmt(),
        ast.insert(ExprStmt { expr: lambda_expr.into() }, Span::DUMMY).to_stmt(),
        ast.insert(ExprStmt { expr: map.into() }, Span::DUMMY).to_stmt(),
    ];
    let body = ast.insert(BraceStmt { stmts }, Span::new(20, 60));
    let p = parameter(&mut ast, n("p"));
    let function = ast.insert(
        function_decl(Some(n("f")), vec![capture], None, vec![p], Some(FunctionBody::Block(body))),
        Span::new(12, 60),
    );

    let receiver = parameter(&mut ast, n("self"));
    let self_uses = [name_expr(&mut ast, n("self")), name_expr(&mut ast, n("self"))];
    let impls = [
        ast.insert(
            SubscriptImpl {
                introducer: AccessEffect::Let,
                body: Some(FunctionBody::Expr(self_uses[0].into())),
            },
            Span::DUMMY,
        ),
        ast.insert(
            SubscriptImpl {
                introducer: AccessEffect::Inout,
                body: Some(FunctionBody::Expr(self_uses[1].into())),
            },
            Span::DUMMY,
        ),
    ];
    let subscript = ast.insert(
        SubscriptDecl {
            name: Some(n("s")),
            generic_parameters: Vec::new(),
            explicit_captures: Vec::new(),
            receiver: Some(receiver),
            parameters: Vec::new(),
            impls: impls.to_vec(),
        },
        Span::new(62, 90),
    );

    let unit = ast.insert(
        TranslationUnit { decls: vec![plus.into(), function.into(), subscript.into()] },
        Span::new(0, 90),
    );
    let module = ast.insert(ModuleDecl { name: n("Main"), sources: vec![unit] }, Span::new(0, 90));

    let scoped = ScopedProgram::new(ast).unwrap_or_else(|e| panic!("{e}"));
    let sample = Sample {
        interner,
        module,
        unit,
        plus,
        function,
        parameter: p,
        capture,
        body,
        binding,
        var,
        use_p,
        use_v,
        lambda_expr,
        lambda,
        inner,
        map,
        sequence,
        operator,
        subscript,
        receiver,
        impls,
        self_uses,
    };
    (scoped, sample)
}

/// Type every node of the sample with `Int`, except its module.
pub(crate) fn typed_everywhere(scoped: ScopedProgram, s: &Sample) -> ProgramBuilder {
    let mut builder = ProgramBuilder::new(scoped, TypePool::new());
    let decls: Vec<AnyDeclId> = builder.scoped().ast().ids_of().collect();
    let exprs: Vec<AnyExprId> = builder.scoped().ast().ids_of().collect();
    for decl in decls {
        builder.set_decl_type(decl, TypeId::INT);
    }
    for expr in exprs {
        builder.set_expr_type(expr, TypeId::INT);
    }
    let module_type = builder.intern(Type::Module(s.module));
    builder.set_decl_type(s.module, module_type);

    builder.set_referred_decl(s.use_p, DeclReference::Direct(s.parameter.into()));
    builder.set_referred_decl(s.use_v, DeclReference::Direct(s.var.into()));
    builder.set_referred_decl(s.inner, DeclReference::Direct(s.var.into()));
    builder.set_referred_decl(s.operator, DeclReference::Direct(s.plus.into()));
    for use_site in s.self_uses {
        builder.set_referred_decl(use_site, DeclReference::Direct(s.receiver.into()));
    }

    builder.set_implicit_captures(
        s.lambda,
        vec![ImplicitCapture {
            name: s.interner.intern("v"),
            ty: TypeId::INT,
            decl: s.var.into(),
            mode: CaptureMode::ByReference,
        }],
    );
    let (lhs, rhs) = {
        let sequence = &builder.scoped().ast()[s.sequence];
        (sequence.head, sequence.tail[0].operand)
    };
    builder.set_folded(
        s.sequence,
        FoldedSequenceExpr::Infix {
            operator: s.operator,
            precedence: PrecedenceGroup::Addition,
            lhs: Box::new(FoldedSequenceExpr::Leaf(lhs)),
            rhs: Box::new(FoldedSequenceExpr::Leaf(rhs)),
        },
    );
    builder
}

/// The sample, checked.
pub(crate) fn sample() -> (crate::TypedProgram, Sample) {
    let (scoped, s) = syntax();
    let program = typed_everywhere(scoped, &s)
        .finish(Box::new(crate::relations::RelationTable::new()))
        .unwrap_or_else(|e| panic!("{e}"));
    (program, s)
}
