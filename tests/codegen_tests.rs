//! End-to-end tests for the code generation pass.
//!
//! Each test builds a resolved model by hand, runs `CodeGenerator::generate` and inspects the write-set. Emitted Rust
//! files are re-parsed with `syn` to check they are syntactically valid.
//!
//! Run with: `cargo test --test codegen_tests`

use std::path::{Path, PathBuf};

use letlang_compiler::backend::render::{LiteralRendering, RenderCx};
use letlang_compiler::backend::{CodeGenerator, CodegenError, CodegenResult, Renderers, TemplateSet, WriteSet};
use letlang_compiler::config::Config;
use letlang_model::{
    BinaryOp, CondBranch, Declaration, Expr, FieldDecl, Function, Literal, Model, Module, ModulePath, Param, Primitive,
    Reference, Statement, TypeDecl, TypeDeclKind, TypeExpr,
};

// ============================================================================
// Fixtures
// ============================================================================

fn module(path: &str) -> Module {
    Module::new(ModulePath::parse(path))
}

/// `f(x: Int) -> Int { return x }`
fn identity() -> Function {
    Function::new("f", Primitive::Int)
        .with_param(Param::new("x", Primitive::Int))
        .with_body(vec![Statement::ret(Expr::local("x"))])
}

fn main_fn() -> Function {
    Function::new("main", Primitive::Unit).with_body(vec![Statement::Expression(Expr::call(
        Reference::declared_in(ModulePath::parse("M"), "f"),
        vec![Literal::Integer(1).into()],
    ))])
}

fn generate(model: &Model, config: &Config) -> CodegenResult<WriteSet> {
    CodeGenerator::new(model, config)?.generate()
}

fn paths(write_set: &WriteSet) -> Vec<PathBuf> {
    write_set.paths().map(Path::to_path_buf).collect()
}

fn assert_valid_rust(write_set: &WriteSet) {
    for file in write_set.files() {
        if file.path.extension().is_some_and(|e| e == "rs") {
            if let Err(e) = syn::parse_file(&file.contents) {
                panic!("{} is not valid Rust: {}\n{}", file.path.display(), e, file.contents);
            }
        }
    }
}

/// A program touching every renderer: records with defaults, cross-module calls, control flow and an entry point.
fn sample_program() -> Model {
    let point = TypeDecl {
        name: "Point".into(),
        public: true,
        type_params: vec![],
        kind: TypeDeclKind::Record(vec![
            FieldDecl {
                name: "x".into(),
                ty: Primitive::Int.into(),
                default: None,
            },
            FieldDecl {
                name: "y".into(),
                ty: Primitive::Int.into(),
                default: Some(Literal::Integer(0)),
            },
        ]),
    };
    let norm = Function::new("norm", Primitive::Int)
        .public()
        .with_param(Param::new("p", TypeExpr::Named(Reference::declared_in(ModulePath::parse("geo"), "Point"))))
        .with_body(vec![Statement::ret(Expr::binary(
            BinaryOp::Add,
            Expr::local("a"),
            Expr::local("b"),
        ))]);
    let count = Function::new("count", Primitive::Int).public().with_body(vec![
        Statement::Let {
            name: "n".into(),
            mutable: true,
            ty: Some(Primitive::Int.into()),
            value: Literal::Integer(0).into(),
        },
        Statement::Loop {
            condition: Expr::binary(BinaryOp::Lt, Expr::local("n"), Literal::Integer(10).into()),
            body: vec![Statement::Conditional {
                branches: vec![CondBranch {
                    condition: Expr::binary(BinaryOp::Eq, Expr::local("n"), Literal::Integer(5).into()),
                    body: vec![Statement::ret(Expr::local("n"))],
                }],
                otherwise: Some(vec![Statement::assign(
                    "n",
                    Expr::binary(BinaryOp::Add, Expr::local("n"), Literal::Integer(1).into()),
                )]),
            }],
        },
        Statement::ret(Expr::local("n")),
    ]);
    let run = Function::new("main", Primitive::Unit).with_body(vec![
        Statement::let_(
            "origin",
            Literal::record(
                Reference::declared_in(ModulePath::parse("geo"), "Point"),
                [("x", Literal::Integer(0)), ("y", Literal::Integer(0))],
            ),
        ),
        Statement::Expression(Expr::call(
            Reference::declared_in(ModulePath::parse("util.counter"), "count"),
            vec![],
        )),
        Statement::Return(None),
    ]);

    Model::new("sample")
        .with_module(module("geo").with_declaration(point).with_declaration(norm))
        .with_module(module("util.counter").with_declaration(count))
        .with_module(module("app").with_declaration(run))
        .with_entry_point(ModulePath::parse("app"), "main")
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_single_module_without_entry_point() {
    let model = Model::new("demo").with_module(module("M").with_declaration(identity()));
    let write_set = generate(&model, &Config::new("out")).unwrap();

    assert_eq!(write_set.root(), Path::new("out"));
    assert_eq!(
        paths(&write_set),
        vec![PathBuf::from("Cargo.toml"), PathBuf::from("src/lib.rs"), PathBuf::from("src/M.rs")]
    );
    let m = write_set.get("src/M.rs").unwrap();
    assert!(m.contains("fn f(x: i64) -> i64 {\n    return x;\n}"), "{m}");
    assert!(write_set.get("src/main.rs").is_none());
    assert!(!write_set.get("Cargo.toml").unwrap().contains("[[bin]]"));
    assert_valid_rust(&write_set);
}

#[test]
fn test_entry_point_adds_one_executable() {
    let model = Model::new("demo")
        .with_module(module("M").with_declaration(identity()).with_declaration(main_fn()))
        .with_entry_point(ModulePath::parse("M"), "main");
    let write_set = generate(&model, &Config::new("out")).unwrap();

    let executables: Vec<&PathBuf> = write_set
        .files()
        .iter()
        .map(|f| &f.path)
        .filter(|p| p.ends_with("main.rs"))
        .collect();
    assert_eq!(executables, vec![&PathBuf::from("src/main.rs")]);
    assert!(write_set.get("src/main.rs").unwrap().contains("demo::M::main();"));
    let m = write_set.get("src/M.rs").unwrap();
    assert!(m.contains("pub fn main() -> () {"), "{m}");
    assert!(m.contains("\nfn f(x: i64) -> i64 {"), "{m}");
    assert!(write_set.get("Cargo.toml").unwrap().contains("[[bin]]\nname = \"demo\""));
    assert_valid_rust(&write_set);
}

#[test]
fn test_sample_program_is_valid_rust() {
    let write_set = generate(&sample_program(), &Config::new("out")).unwrap();
    assert_eq!(
        paths(&write_set),
        vec![
            PathBuf::from("Cargo.toml"),
            PathBuf::from("src/lib.rs"),
            PathBuf::from("src/util/mod.rs"),
            PathBuf::from("src/geo.rs"),
            PathBuf::from("src/util/counter.rs"),
            PathBuf::from("src/app.rs"),
            PathBuf::from("src/main.rs"),
        ]
    );
    let app = write_set.get("src/app.rs").unwrap();
    assert!(app.contains("use crate::geo;\nuse crate::util::counter;"), "{app}");
    assert!(app.contains("let origin = geo::Point { x: 0, y: 0 };"), "{app}");
    assert!(app.contains("counter::count();"), "{app}");
    assert!(app.contains("pub fn main() -> () {"), "{app}");
    let geo = write_set.get("src/geo.rs").unwrap();
    assert!(geo.contains("pub fn norm(p: Point) -> i64"), "{geo}");
    assert!(geo.contains("pub fn new(x: i64) -> Self"), "{geo}");
    assert_valid_rust(&write_set);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_generation_is_deterministic() {
    let model = sample_program();
    let config = Config::new("out").with_dependency("serde").with_dependency("rand@0.8");
    let generator = CodeGenerator::new(&model, &config).unwrap();
    let first = generator.generate().unwrap();
    let second = generator.generate().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, generate(&model, &config).unwrap());
}

#[test]
fn test_declaration_order_is_preserved() {
    let names = ["zeta", "alpha", "mid", "beta"];
    let mut m = module("M");
    for name in names {
        m = m.with_declaration(Function::new(name, Primitive::Unit));
    }
    let write_set = generate(&Model::new("demo").with_module(m), &Config::new("out")).unwrap();
    let text = write_set.get("src/M.rs").unwrap();
    let positions: Vec<usize> = names
        .iter()
        .map(|n| text.find(&format!("fn {}(", n)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
}

#[test]
fn test_parallel_matches_sequential() {
    let model = sample_program();
    let sequential = generate(&model, &Config::new("out")).unwrap();
    let parallel = generate(&model, &Config::new("out").with_option("parallel", true)).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_format_option_pretty_prints_rust_files() {
    let model = sample_program();
    let write_set = generate(&model, &Config::new("out").with_option("format", true)).unwrap();
    for file in write_set.files() {
        if file.path.extension().is_some_and(|e| e == "rs") {
            let reparsed = prettyplease::unparse(&syn::parse_file(&file.contents).unwrap());
            assert_eq!(reparsed, file.contents, "{} is not in formatted form", file.path.display());
        }
    }
    let plain = generate(&model, &Config::new("out")).unwrap();
    assert_eq!(write_set.get("Cargo.toml"), plain.get("Cargo.toml"));
}

#[test]
fn test_banner_can_be_disabled() {
    let model = Model::new("demo").with_module(module("M").with_declaration(identity()));
    let with_banner = generate(&model, &Config::new("out")).unwrap();
    assert!(with_banner.get("src/M.rs").unwrap().starts_with("//! Generated by letlangc"));

    let without = generate(&model, &Config::new("out").with_option("banner", false)).unwrap();
    assert!(without.get("src/M.rs").unwrap().starts_with("fn f("));
}

// ============================================================================
// Closed sets and failures
// ============================================================================

#[test]
fn test_unsupported_literal_aborts_generation() {
    let f = Function::new("f", Primitive::Unit).with_body(vec![Statement::let_("ok", Literal::Atom("ok".into()))]);
    let model = Model::new("demo").with_module(module("M").with_declaration(f));
    match generate(&model, &Config::new("out")).unwrap_err() {
        CodegenError::UnsupportedLiteralKind { kind, location } => {
            assert_eq!(kind, "atom");
            assert_eq!(location.to_string(), "module M > fn f > statement 1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unsupported_type_shape_aborts_generation() {
    let f = Function::new("f", TypeExpr::Union(vec![Primitive::Int.into(), Primitive::Str.into()]));
    let model = Model::new("demo").with_module(module("M").with_declaration(f));
    let err = generate(&model, &Config::new("out")).unwrap_err();
    assert!(matches!(err, CodegenError::UnsupportedTypeShape { shape: "union", .. }), "{err}");
}

#[test]
fn test_unsupported_statement_aborts_generation() {
    let f = Function::new("f", Primitive::Unit).with_body(vec![Statement::Throw(Literal::string("boom").into())]);
    let model = Model::new("demo").with_module(module("M").with_declaration(f));
    let err = generate(&model, &Config::new("out")).unwrap_err();
    assert!(matches!(err, CodegenError::UnsupportedStatementKind { kind: "throw", .. }), "{err}");
}

#[test]
fn test_entry_point_must_name_a_function() {
    let model = Model::new("demo")
        .with_module(module("M").with_declaration(identity()))
        .with_entry_point(ModulePath::parse("M"), "main");
    let err = generate(&model, &Config::new("out")).unwrap_err();
    assert!(matches!(err, CodegenError::MissingEntryPoint { .. }), "{err}");
}

#[test]
fn test_duplicate_module_paths_are_rejected() {
    let model = Model::new("demo").with_module(module("M")).with_module(module("M"));
    let err = generate(&model, &Config::new("out")).unwrap_err();
    assert!(matches!(err, CodegenError::DuplicateOutputPath { ref path } if path == Path::new("src/M.rs")));
}

#[test]
fn test_root_module_becomes_the_crate_root() {
    let root = Module::new(ModulePath::default()).with_declaration(identity().public());
    let alone = Model::new("demo").with_module(root.clone());
    let write_set = generate(&alone, &Config::new("out")).unwrap();
    assert_eq!(paths(&write_set), vec![PathBuf::from("Cargo.toml"), PathBuf::from("src/lib.rs")]);
    assert!(write_set.get("src/lib.rs").unwrap().contains("pub fn f(x: i64) -> i64"));

    let nested = Model::new("demo")
        .with_module(root.with_declaration(main_fn()))
        .with_module(module("M").with_declaration(identity().public()))
        .with_entry_point(ModulePath::default(), "main");
    let write_set = generate(&nested, &Config::new("out").with_option("format", true)).unwrap();
    assert_eq!(
        paths(&write_set),
        vec![
            PathBuf::from("Cargo.toml"),
            PathBuf::from("src/lib.rs"),
            PathBuf::from("src/M.rs"),
            PathBuf::from("src/main.rs"),
        ]
    );
    let lib = write_set.get("src/lib.rs").unwrap();
    assert!(lib.contains("pub mod M;"), "{lib}");
    assert!(lib.contains("pub fn main()"), "{lib}");
    assert!(lib.contains("M::f(1);"), "{lib}");
    assert!(write_set.get("src/main.rs").unwrap().contains("demo::main();"));
}

#[test]
fn test_record_literal_conditions_stay_valid_rust() {
    let point = TypeDecl {
        name: "P".into(),
        public: false,
        type_params: vec![],
        kind: TypeDeclKind::Record(vec![FieldDecl {
            name: "x".into(),
            ty: Primitive::Int.into(),
            default: None,
        }]),
    };
    let origin = || -> Expr {
        Literal::record(Reference::declared_in(ModulePath::parse("M"), "P"), [("x", Literal::Integer(1))]).into()
    };
    let check = Function::new("is_origin", Primitive::Bool)
        .with_param(Param::new("p", TypeExpr::Named(Reference::declared_in(ModulePath::parse("M"), "P"))))
        .with_body(vec![
            Statement::Loop {
                condition: Expr::binary(BinaryOp::Ne, Expr::local("p"), origin()),
                body: vec![Statement::ret(Literal::Boolean(false))],
            },
            Statement::Conditional {
                branches: vec![CondBranch {
                    condition: Expr::binary(BinaryOp::Eq, Expr::local("p"), origin()),
                    body: vec![Statement::ret(Literal::Boolean(true))],
                }],
                otherwise: None,
            },
            Statement::ret(Literal::Boolean(false)),
        ]);
    let model = Model::new("demo").with_module(module("M").with_declaration(point).with_declaration(check));
    let plain = generate(&model, &Config::new("out")).unwrap();
    let m = plain.get("src/M.rs").unwrap();
    assert!(m.contains("while (p != P { x: 1 }) {"), "{m}");
    assert!(m.contains("if (p == P { x: 1 }) {"), "{m}");
    assert_valid_rust(&plain);
    generate(&model, &Config::new("out").with_option("format", true)).unwrap();
}

// ============================================================================
// Pluggability
// ============================================================================

/// Emits integers in hexadecimal and delegates everything else to the standard renderer.
struct HexIntegers;

impl LiteralRendering for HexIntegers {
    fn render_literal(&self, cx: &RenderCx<'_>, literal: &Literal) -> CodegenResult<String> {
        match literal {
            Literal::Integer(v) if *v >= 0 => Ok(format!("{:#x}", v)),
            other => letlang_compiler::backend::render::LiteralRenderer.render_literal(cx, other),
        }
    }
}

#[test]
fn test_replacing_a_renderer_changes_every_dependent() {
    let f = Function::new("f", Primitive::Int).with_body(vec![Statement::ret(Expr::binary(
        BinaryOp::Add,
        Literal::Integer(255).into(),
        Literal::Integer(-1).into(),
    ))]);
    let model = Model::new("demo").with_module(module("M").with_declaration(f));
    let config = Config::new("out").with_option("banner", false);
    let write_set = CodeGenerator::new(&model, &config)
        .unwrap()
        .with_renderers(Renderers::default().with_literal(HexIntegers))
        .generate()
        .unwrap();
    assert!(write_set.get("src/M.rs").unwrap().contains("return 0xff + -1;"));
}

#[test]
fn test_template_overrides_change_the_dialect() {
    let templates = TemplateSet::bundled()
        .unwrap()
        .with_overrides([("stmt/return", "return ({{value}});")])
        .unwrap();
    let model = Model::new("demo").with_module(module("M").with_declaration(identity()));
    let config = Config::new("out");
    let write_set = CodeGenerator::new(&model, &config)
        .unwrap()
        .with_templates(&templates)
        .generate()
        .unwrap();
    assert!(write_set.get("src/M.rs").unwrap().contains("return (x);"));
}

#[test]
fn test_template_override_with_unknown_slot_is_rejected() {
    let err = TemplateSet::bundled()
        .unwrap()
        .with_overrides([("stmt/return", "return {{valu}};")])
        .unwrap_err();
    assert!(matches!(err, CodegenError::UndeclaredTemplateSlot { ref slot, .. } if slot == "valu"));
}

#[test]
fn test_model_declarations_round_trip_through_json() {
    let model = sample_program();
    let json = serde_json::to_string(&model).unwrap();
    let back: Model = serde_json::from_str(&json).unwrap();
    assert_eq!(generate(&model, &Config::new("out")).unwrap(), generate(&back, &Config::new("out")).unwrap());
    assert!(matches!(back.modules[0].declarations[0], Declaration::Type(_)));
}
