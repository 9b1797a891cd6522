use serde_json::json;

use super::*;
use crate::generator::model::Constraints;

#[test]
fn string_checks_render_in_canonical_order() {
  let expr = ZodExpr::String {
    checks: vec![
      StringCheck::Format(StringFormat::Email),
      StringCheck::Min(1),
      StringCheck::Max(64),
    ],
  };
  assert_eq!(expr.render(), "z.string().email().min(1).max(64)");
}

#[test]
fn equal_string_bounds_collapse_to_length() {
  let constraints = Constraints {
    min_length: Some(5),
    max_length: Some(5),
    ..Constraints::default()
  };
  let checks = checks::string_checks(&constraints);
  assert_eq!(checks, vec![StringCheck::Length(5)]);

  let rendered = ZodExpr::String { checks }.render();
  assert_eq!(rendered, "z.string().length(5)");
  assert!(!rendered.contains(".min("));
  assert!(!rendered.contains(".max("));
}

#[test]
fn exclusive_bound_wins_at_same_boundary() {
  let constraints = Constraints {
    minimum: Some(0.0),
    exclusive_minimum: Some(0.0),
    ..Constraints::default()
  };
  let checks = checks::number_checks(&constraints);
  assert_eq!(checks, vec![NumberCheck::Gt(0.0)]);

  let rendered = ZodExpr::Number {
    integer: false,
    coerce: false,
    checks,
  }
  .render();
  assert_eq!(rendered, "z.number().gt(0)");
  assert!(!rendered.contains("gte"));
}

#[test]
fn stricter_lower_bound_wins() {
  let constraints = Constraints {
    minimum: Some(3.0),
    exclusive_minimum: Some(1.0),
    ..Constraints::default()
  };
  assert_eq!(checks::number_checks(&constraints), vec![NumberCheck::Gte(3.0)]);
}

#[test]
fn upper_bound_is_symmetric() {
  let constraints = Constraints {
    maximum: Some(10.0),
    exclusive_maximum: Some(10.0),
    ..Constraints::default()
  };
  assert_eq!(checks::number_checks(&constraints), vec![NumberCheck::Lt(10.0)]);
}

#[test]
fn equal_array_bounds_collapse_to_length() {
  let constraints = Constraints {
    min_items: Some(2),
    max_items: Some(2),
    ..Constraints::default()
  };
  assert_eq!(checks::array_checks(&constraints), vec![ArrayCheck::Length(2)]);
}

#[test]
fn integer_renders_int_refinement() {
  let expr = ZodExpr::Number {
    integer: true,
    coerce: false,
    checks: vec![NumberCheck::Gte(0.0)],
  };
  assert_eq!(expr.render(), "z.number().int().gte(0)");
}

#[test]
fn coerced_scalars_render_coerce_namespace() {
  let number = ZodExpr::Number {
    integer: false,
    coerce: true,
    checks: vec![],
  };
  assert_eq!(number.render(), "z.coerce.number()");
  assert_eq!(ZodExpr::Boolean { coerce: true }.render(), "z.coerce.boolean()");
}

#[test]
fn object_renders_members_with_decorators() {
  let expr = ZodExpr::Object {
    members: vec![
      ObjectMember::new("id", ZodExpr::number()),
      ObjectMember {
        key: "name".into(),
        expr: ZodExpr::string(),
        optional: true,
        read_only: true,
        default: Some(json!("anon")),
      },
      ObjectMember::new("x-tag", ZodExpr::string()).optional(),
    ],
    catch_all: CatchAll::Open,
  };

  let rendered = expr.render();
  let expected = "z.object({\n  id: z.number(),\n  name: z.string().readonly().optional().default(\"anon\"),\n  \"x-tag\": z.string().optional(),\n}).passthrough()";
  assert_eq!(rendered, expected);
}

#[test]
fn closed_and_typed_catch_alls() {
  let closed = ZodExpr::Object {
    members: vec![ObjectMember::new("a", ZodExpr::string())],
    catch_all: CatchAll::Closed,
  };
  assert!(closed.render().ends_with(".strict()"));

  let typed = ZodExpr::Object {
    members: vec![],
    catch_all: CatchAll::Schema(Box::new(ZodExpr::number())),
  };
  assert_eq!(typed.render(), "z.object({}).catchall(z.number())");
}

#[test]
fn nested_objects_indent_consistently() {
  let inner = ZodExpr::Object {
    members: vec![ObjectMember::new("street", ZodExpr::string())],
    catch_all: CatchAll::Open,
  };
  let outer = ZodExpr::Object {
    members: vec![ObjectMember::new("address", inner)],
    catch_all: CatchAll::Open,
  };
  let expected = "z.object({\n  address: z.object({\n    street: z.string(),\n  }).passthrough(),\n}).passthrough()";
  assert_eq!(outer.render(), expected);
}

#[test]
fn enum_preserves_value_order() {
  let expr = ZodExpr::EnumOf(vec!["pending".into(), "active".into(), "done".into()]);
  assert_eq!(expr.render(), "z.enum([\"pending\", \"active\", \"done\"])");
}

#[test]
fn literal_union_preserves_literal_types() {
  let expr = ZodExpr::LiteralUnion(vec![json!(1), json!("one"), json!(true)]);
  assert_eq!(
    expr.render(),
    "z.union([z.literal(1), z.literal(\"one\"), z.literal(true)])"
  );
}

#[test]
fn discriminated_union_quotes_property() {
  let expr = ZodExpr::DiscriminatedUnion {
    discriminator: "petType".into(),
    variants: vec![
      ZodExpr::Reference {
        ident: "Cat".into(),
        lazy: false,
      },
      ZodExpr::Reference {
        ident: "Dog".into(),
        lazy: false,
      },
    ],
  };
  assert_eq!(expr.render(), "z.discriminatedUnion(\"petType\", [Cat, Dog])");
}

#[test]
fn intersection_chains_and_calls() {
  let expr = ZodExpr::Intersection {
    base: Box::new(ZodExpr::Reference {
      ident: "Base".into(),
      lazy: false,
    }),
    rest: vec![ZodExpr::Object {
      members: vec![ObjectMember::new("extra", ZodExpr::string())],
      catch_all: CatchAll::Open,
    }],
  };
  assert!(expr.render().starts_with("Base.and(z.object({"));
}

#[test]
fn negated_refinement_wraps_child() {
  let expr = ZodExpr::NegatedRefinement(Box::new(ZodExpr::string()));
  assert_eq!(
    expr.render(),
    "z.any().refine((value) => !(z.string()).safeParse(value).success)"
  );
}

#[test]
fn lazy_reference_wraps_in_thunk() {
  let expr = ZodExpr::Reference {
    ident: "Node".into(),
    lazy: true,
  };
  assert_eq!(expr.render(), "z.lazy(() => Node)");
}

#[test]
fn nullable_wraps_exactly_once() {
  let expr = ZodExpr::string().nullable().nullable();
  assert_eq!(expr.render(), "z.string().nullable()");
  assert_eq!(ZodExpr::Null.nullable().render(), "z.null()");
}

#[test]
fn regex_check_escapes_slashes() {
  let expr = ZodExpr::String {
    checks: vec![StringCheck::Regex("^a/b$".into())],
  };
  assert_eq!(expr.render(), "z.string().regex(/^a\\/b$/)");
}

#[test]
fn tuple_renders_fixed_items() {
  let expr = ZodExpr::Tuple(vec![ZodExpr::string(), ZodExpr::number()]);
  assert_eq!(expr.render(), "z.tuple([z.string(), z.number()])");
}
