//! Canonical type names for diagnostics.

use crate::{FunctionType, Type, TypeParameters};

/// A composite node whose opening token has been written.
enum Frame {
    /// `name(` written; children are separated by `, ` and closed by `)`.
    Params { params: TypeParameters, next: usize },
    /// `(` written; arguments are followed by `) -> ` and the result.
    Function { function: FunctionType, next: usize },
}

enum Step {
    Child(Type),
    Done,
}

impl Frame {
    fn advance(&mut self, out: &mut String) -> Step {
        match self {
            Frame::Params { params, next } => {
                if *next < params.len() {
                    if *next > 0 {
                        out.push_str(", ");
                    }
                    *next += 1;
                    Step::Child(params[*next - 1].clone())
                } else {
                    out.push(')');
                    Step::Done
                }
            }
            Frame::Function { function, next } => {
                let args = function.args();
                if *next < args.len() {
                    if *next > 0 {
                        out.push_str(", ");
                    }
                    *next += 1;
                    Step::Child(args[*next - 1].clone())
                } else if *next == args.len() {
                    out.push_str(") -> ");
                    *next += 1;
                    Step::Child(function.result().clone())
                } else {
                    Step::Done
                }
            }
        }
    }
}

/// Render the canonical name of a type.
///
/// ```text
/// list(int)   map(string, dyn)   wrapper(int)   type(uint)
/// optional_type(bytes)   (int, string) -> bool   acme.Order
/// ```
///
/// Nesting depth is bounded only by memory.
pub fn format_type_name(ty: &Type) -> String {
    let mut out = String::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut current = Some(ty.clone());

    loop {
        if let Some(ty) = current.take() {
            if let Some(frame) = open(&ty, &mut out) {
                stack.push(frame);
            }
        }
        let Some(frame) = stack.last_mut() else {
            break;
        };
        match frame.advance(&mut out) {
            Step::Child(child) => current = Some(child),
            Step::Done => {
                stack.pop();
            }
        }
    }
    out
}

/// Write the opening token of `ty`, returning a frame if it has children.
fn open(ty: &Type, out: &mut String) -> Option<Frame> {
    match ty {
        Type::Any => out.push_str("any"),
        Type::BoolWrapper
        | Type::IntWrapper
        | Type::UintWrapper
        | Type::DoubleWrapper
        | Type::StringWrapper
        | Type::BytesWrapper => {
            out.push_str("wrapper(");
            out.push_str(ty.unwrap().name());
            out.push(')');
        }
        Type::List(_) | Type::Map(_) => return open_params(ty.name(), ty.parameters(), out),
        Type::Type(type_type) => return open_params("type", type_type.parameters(), out),
        Type::Opaque(opaque) => {
            let name = if opaque.name().is_empty() {
                "*opaque*"
            } else {
                opaque.name()
            };
            return open_params(name, opaque.parameters(), out);
        }
        Type::Function(function) => {
            out.push('(');
            return Some(Frame::Function {
                function: function.clone(),
                next: 0,
            });
        }
        other => out.push_str(other.name()),
    }
    None
}

fn open_params(name: &str, params: TypeParameters, out: &mut String) -> Option<Frame> {
    out.push_str(name);
    if params.is_empty() {
        return None;
    }
    out.push('(');
    Some(Frame::Params { params, next: 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicStructType, ListType, MapType, OpaqueType, OptionalType, TypeParamType, TypeType};

    #[test]
    fn leaf_spellings() {
        assert_eq!(format_type_name(&Type::Int), "int");
        assert_eq!(format_type_name(&Type::Dyn), "dyn");
        assert_eq!(format_type_name(&Type::Any), "any");
        assert_eq!(format_type_name(&Type::Null), "null_type");
        assert_eq!(format_type_name(&Type::Error), "*error*");
        assert_eq!(format_type_name(&Type::Unknown), "*unknown*");
        assert_eq!(format_type_name(&Type::IntWrapper), "wrapper(int)");
        assert_eq!(format_type_name(&Type::BytesWrapper), "wrapper(bytes)");
        assert_eq!(format_type_name(&Type::Duration), "google.protobuf.Duration");
    }

    #[test]
    fn compound_spellings() {
        let map = Type::from(MapType::new(
            Type::String,
            Type::from(ListType::new(Type::Int)),
        ));
        assert_eq!(format_type_name(&map), "map(string, list(int))");

        let optional = Type::from(OptionalType::new(Type::Bytes));
        assert_eq!(optional.to_string(), "optional_type(bytes)");

        assert_eq!(format_type_name(&Type::from(TypeType::default())), "type");
        assert_eq!(
            format_type_name(&Type::from(TypeType::new(Type::Uint))),
            "type(uint)"
        );

        let unnamed = Type::from(OpaqueType::new("", &[]));
        assert_eq!(format_type_name(&unnamed), "*opaque*");

        let param = Type::from(TypeParamType::new("T"));
        assert_eq!(format_type_name(&param), "T");

        let order = Type::from(crate::StructType::from(BasicStructType::new("acme.Order")));
        assert_eq!(format_type_name(&order), "acme.Order");
    }

    #[test]
    fn function_spelling() {
        let function = Type::from(FunctionType::new(
            Type::Bool,
            &[Type::Int, Type::from(ListType::new(Type::String))],
        ));
        assert_eq!(format_type_name(&function), "(int, list(string)) -> bool");

        let nullary = Type::from(FunctionType::new(Type::Timestamp, &[]));
        assert_eq!(format_type_name(&nullary), "() -> google.protobuf.Timestamp");

        let higher = Type::from(FunctionType::new(
            Type::from(FunctionType::new(Type::Int, &[Type::Int])),
            &[Type::Dyn],
        ));
        assert_eq!(format_type_name(&higher), "(dyn) -> (int) -> int");
    }

    #[test]
    fn deep_nesting_is_iterative() {
        let depth = 1000;
        let mut ty = Type::Int;
        for _ in 0..depth {
            ty = Type::from(OpaqueType::new("ptype", &[ty]));
        }
        let expected = format!("{}int{}", "ptype(".repeat(depth), ")".repeat(depth));
        assert_eq!(format_type_name(&ty), expected);
    }
}
