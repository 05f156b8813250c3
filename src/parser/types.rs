//! Type expressions: primitives, named types, unions, records, arrays,
//! sets, maps, and the inline `name = (<type>)` definition shorthand.

use crate::ast::{Type, TypeField};
use crate::cursor::PResult;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn type_expr(&mut self) -> PResult<Type> {
        self.ws();
        // (T) grouping / (T1,T2,...) union
        if let Ok(t) = self.attempt(|p| {
            p.tok("(")?;
            let first = p.type_expr()?;
            let mut types = vec![first];
            while let Ok(t) = p.attempt(|p| {
                p.tok(",")?;
                p.type_expr()
            }) {
                types.push(t);
            }
            p.tok(")")?;
            if types.len() == 1 {
                Ok(types.pop().unwrap_or(Type::TypeUnion { types: vec![] }))
            } else {
                Ok(Type::TypeUnion { types })
            }
        }) {
            return Ok(t);
        }
        // |[T]| set and |{K,V}| map share the leading bar.
        if let Ok(inner) = self.attempt(|p| {
            p.tok("|[")?;
            let inner = p.type_expr()?;
            p.tok("]|")?;
            Ok(inner)
        }) {
            return Ok(Type::TypeSet {
                inner: Box::new(inner),
            });
        }
        if let Ok((key, val)) = self.attempt(|p| {
            p.tok("|{")?;
            let key = p.type_expr()?;
            p.tok(",")?;
            let val = p.type_expr()?;
            p.tok("}|")?;
            Ok((key, val))
        }) {
            return Ok(Type::TypeMap {
                key_type: Box::new(key),
                val_type: Box::new(val),
            });
        }
        if let Ok(inner) = self.attempt(|p| {
            p.tok("[")?;
            let inner = p.type_expr()?;
            p.tok("]")?;
            Ok(inner)
        }) {
            return Ok(Type::TypeArray {
                inner: Box::new(inner),
            });
        }
        if let Ok(fields) = self.attempt(|p| {
            p.tok("{")?;
            let fields = p.type_fields()?;
            p.tok("}")?;
            Ok(fields)
        }) {
            return Ok(Type::TypeRecord { fields });
        }
        if let Ok(name) = self.primitive_type_name() {
            return Ok(Type::TypePrimitive { name });
        }
        // name = (T) inline definition, else a plain type-name reference
        if let Ok(t) = self.attempt(|p| {
            p.ws();
            let name = p.identifier()?;
            p.tok("=")?;
            p.tok("(")?;
            let typ = p.type_expr()?;
            p.tok(")")?;
            Ok(Type::TypeDef {
                name,
                typ: Box::new(typ),
            })
        }) {
            return Ok(t);
        }
        if let Ok(name) = self.attempt(|p| {
            p.ws();
            p.identifier()
        }) {
            return Ok(Type::TypeName { name });
        }
        self.expecting("type")
    }

    fn type_fields(&mut self) -> PResult<Vec<TypeField>> {
        let mut fields = Vec::new();
        if let Ok(first) = self.attempt(Self::type_field) {
            fields.push(first);
            while let Ok(field) = self.attempt(|p| {
                p.tok(",")?;
                p.type_field()
            }) {
                fields.push(field);
            }
        }
        Ok(fields)
    }

    fn type_field(&mut self) -> PResult<TypeField> {
        self.ws();
        let name = if let Ok(name) = self.identifier() {
            name
        } else {
            self.string_literal()?
        };
        self.tok(":")?;
        let typ = self.type_expr()?;
        Ok(TypeField { name, typ })
    }
}
