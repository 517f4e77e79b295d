use std::{fmt::Display, str::FromStr};

/// The types a Vuo expression can have. Equality is structural; `Function`
/// never appears in source-level annotations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Type {
    Unit,
    Int,
    Bool,
    Function {
        params: Vec<Type>,
        returns: Box<Type>,
    },
}

impl Type {
    pub fn function(params: Vec<Type>, returns: Type) -> Self {
        Type::Function {
            params,
            returns: Box::new(returns),
        }
    }
}

pub struct TypeParseError(pub String);

impl FromStr for Type {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unit" => Ok(Self::Unit),
            "Int" => Ok(Self::Int),
            "Bool" => Ok(Self::Bool),
            _ => Err(TypeParseError(format!("invalid type \"{s}\""))),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Unit => f.write_str("Unit"),
            Type::Int => f.write_str("Int"),
            Type::Bool => f.write_str("Bool"),
            Type::Function { params, returns } => {
                f.write_str("(")?;
                for (index, param) in params.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    param.fmt(f)?;
                }
                write!(f, ") => {returns}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotations_resolve_to_primitive_types() {
        assert_eq!(Ok(Type::Int), "Int".parse().map_err(|_| ()));
        assert_eq!(Ok(Type::Bool), "Bool".parse().map_err(|_| ()));
        assert_eq!(Ok(Type::Unit), "Unit".parse().map_err(|_| ()));
        assert!("int".parse::<Type>().is_err());
        assert!("Integer".parse::<Type>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!("Int", Type::Int.to_string());
        assert_eq!(
            "(Int, Int) => Bool",
            Type::function(vec![Type::Int, Type::Int], Type::Bool).to_string()
        );
        assert_eq!("() => Int", Type::function(vec![], Type::Int).to_string());
    }
}
