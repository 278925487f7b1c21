//! Go emission for expression ASTs.
//!
//! Free identifiers become lookups on the scope identifier; everything else
//! maps structurally. Consumers add their own coercions (`interfaceToBool`,
//! `interfaceToStr`); the emitter produces bare values.

use verso_carton::go_quote;

use super::parser::{BinaryOp, Expr, ObjectKey, UnaryOp};

/// Emit a Go expression for `expr`, resolving free identifiers against
/// `scope`.
pub fn emit(expr: &Expr, scope: &str) -> String {
    emit_prec(expr, scope, 0)
}

/// Precedence levels; higher binds tighter. Atoms (literals, lookups,
/// calls, emitted closures) never need parentheses.
fn prec(expr: &Expr) -> u8 {
    match expr {
        Expr::Binary(op, _, _) => match op {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq | BinaryOp::NotEq => 3,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 6,
        },
        Expr::Unary(_, _) => 7,
        _ => 9,
    }
}

fn emit_prec(expr: &Expr, scope: &str, min_prec: u8) -> String {
    let code = match expr {
        Expr::Ident(name) => format!("{scope}[{}]", go_quote(name)),
        Expr::Number(n) => n.clone(),
        Expr::Str(s) => go_quote(s),
        Expr::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        Expr::Null => "nil".to_string(),
        Expr::Member(obj, prop) => {
            format!("{}[{}]", emit_prec(obj, scope, 8), go_quote(prop))
        }
        Expr::Index(obj, index) => {
            format!("{}[{}]", emit_prec(obj, scope, 8), emit_prec(index, scope, 0))
        }
        Expr::Unary(op, operand) => {
            let op = match op {
                UnaryOp::Not => "!",
                UnaryOp::Neg => "-",
                UnaryOp::Pos => "+",
            };
            format!("{op}{}", emit_prec(operand, scope, 7))
        }
        Expr::Binary(op, left, right) => {
            let my_prec = prec(expr);
            let op = match op {
                BinaryOp::Or => "||",
                BinaryOp::And => "&&",
                BinaryOp::Eq => "==",
                BinaryOp::NotEq => "!=",
                BinaryOp::Lt => "<",
                BinaryOp::Gt => ">",
                BinaryOp::LtEq => "<=",
                BinaryOp::GtEq => ">=",
                BinaryOp::Add => "+",
                BinaryOp::Sub => "-",
                BinaryOp::Mul => "*",
                BinaryOp::Div => "/",
                BinaryOp::Rem => "%",
            };
            format!(
                "{} {op} {}",
                emit_prec(left, scope, my_prec),
                emit_prec(right, scope, my_prec + 1)
            )
        }
        Expr::Conditional(condition, consequent, alternate) => {
            // Go has no ternary; an immediately-invoked closure stands in
            format!(
                "func() interface{{}} {{ if interfaceToBool({}) {{ return {} }}; return {} }}()",
                emit_prec(condition, scope, 0),
                emit_prec(consequent, scope, 0),
                emit_prec(alternate, scope, 0)
            )
        }
        Expr::Call(callee, args) => {
            let args: Vec<String> = args.iter().map(|a| emit_prec(a, scope, 0)).collect();
            format!("{}({})", emit_prec(callee, scope, 8), args.join(", "))
        }
        Expr::Array(items) => {
            let mut out = String::from("[]interface{}{");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&emit_prec(item, scope, 0));
            }
            out.push('}');
            out
        }
        Expr::Object(entries) => {
            let mut out = String::from("map[string]interface{}{");
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                match key {
                    ObjectKey::Static(name) => out.push_str(&go_quote(name)),
                    ObjectKey::Computed(expr) => {
                        // Keys stay strings in the emitted map literal
                        out.push_str("interfaceToStr(");
                        out.push_str(&emit_prec(expr, scope, 0));
                        out.push(')');
                    }
                }
                out.push_str(": ");
                out.push_str(&emit_prec(value, scope, 0));
            }
            out.push('}');
            out
        }
    };

    if prec(expr) < min_prec {
        format!("({code})")
    } else {
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lexer::scan;
    use crate::expr::parser::parse;

    fn emit_src(src: &str) -> String {
        let expr = parse(src, scan(src).unwrap()).unwrap();
        emit(&expr, "this")
    }

    #[test]
    fn test_ident_lookup() {
        assert_eq!(emit_src("name"), r#"this["name"]"#);
    }

    #[test]
    fn test_member_chain() {
        assert_eq!(emit_src("a.b.c"), r#"this["a"]["b"]["c"]"#);
    }

    #[test]
    fn test_index() {
        assert_eq!(emit_src("a[i]"), r#"this["a"][this["i"]]"#);
        assert_eq!(emit_src("a[0]"), r#"this["a"][0]"#);
    }

    #[test]
    fn test_literals() {
        assert_eq!(emit_src("1.5"), "1.5");
        assert_eq!(emit_src("'hi'"), "\"hi\"");
        assert_eq!(emit_src("true"), "true");
        assert_eq!(emit_src("null"), "nil");
    }

    #[test]
    fn test_binary_with_precedence() {
        assert_eq!(
            emit_src("a + b * c"),
            r#"this["a"] + this["b"] * this["c"]"#
        );
        assert_eq!(
            emit_src("(a + b) * c"),
            r#"(this["a"] + this["b"]) * this["c"]"#
        );
    }

    #[test]
    fn test_unary_wraps_composite_operand() {
        assert_eq!(emit_src("!ok"), r#"!this["ok"]"#);
        assert_eq!(
            emit_src("!(a && b)"),
            r#"!(this["a"] && this["b"])"#
        );
    }

    #[test]
    fn test_call() {
        assert_eq!(
            emit_src("fmt(a, 1)"),
            r#"this["fmt"](this["a"], 1)"#
        );
    }

    #[test]
    fn test_array_literal() {
        assert_eq!(
            emit_src("[1, a]"),
            r#"[]interface{}{1, this["a"]}"#
        );
    }

    #[test]
    fn test_object_literal() {
        assert_eq!(
            emit_src("{a: 1, 'b': c}"),
            r#"map[string]interface{}{"a": 1, "b": this["c"]}"#
        );
    }

    #[test]
    fn test_object_computed_key() {
        assert_eq!(
            emit_src(r#"({[a + "1"]: 1})"#),
            r#"map[string]interface{}{interfaceToStr(this["a"] + "1"): 1}"#
        );
    }

    #[test]
    fn test_conditional_closure() {
        assert_eq!(
            emit_src("ok ? a : b"),
            r#"func() interface{} { if interfaceToBool(this["ok"]) { return this["a"] }; return this["b"] }()"#
        );
    }

    #[test]
    fn test_scope_ident_is_configurable() {
        let expr = parse("x", scan("x").unwrap()).unwrap();
        assert_eq!(emit(&expr, "data"), r#"data["x"]"#);
    }
}
