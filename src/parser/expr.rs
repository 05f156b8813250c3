//! Expression grammar: the precedence ladder, postfix chains, constructors,
//! and the search-boolean grammar used by filter stages.

use crate::ast::{BinOp, Expr, MapEntry, Primitive, RecordField, Type, UnaryOp};
use crate::cursor::{Fail, PResult};
use crate::parser::{Parser, PRIMITIVE_TYPES};
use crate::reglob::{is_globby, reglob, GlobOptions};

enum Postfix {
    Field(String),
    Method(String, Vec<Expr>),
    Index(Expr),
    Slice(Option<Expr>, Option<Expr>),
}

impl<'a> Parser<'a> {
    /// Entry: the full precedence ladder, conditional at the top.
    pub(crate) fn expr(&mut self) -> PResult<Expr> {
        self.conditional()
    }

    fn conditional(&mut self) -> PResult<Expr> {
        let cond = self.or_expr()?;
        if self.tok("?").is_ok() {
            let then = self.expr()?;
            self.tok(":")?;
            let otherwise = self.expr()?;
            return Ok(Expr::Conditional {
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            });
        }
        Ok(cond)
    }

    fn or_expr(&mut self) -> PResult<Expr> {
        let mut lhs = self.and_expr()?;
        while let Ok(rhs) = self.attempt(|p| {
            p.kw("or")?;
            p.and_expr()
        }) {
            lhs = Expr::binary(BinOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> PResult<Expr> {
        let mut lhs = self.equality()?;
        while let Ok(rhs) = self.attempt(|p| {
            p.kw("and")?;
            p.equality()
        }) {
            lhs = Expr::binary(BinOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    pub(crate) fn equality(&mut self) -> PResult<Expr> {
        let mut lhs = self.relational()?;
        loop {
            if self.tok("==").is_ok() {
                let rhs = self.relational()?;
                lhs = Expr::binary(BinOp::Eq, lhs, rhs);
            } else if self.tok("!=").is_ok() {
                let rhs = self.relational()?;
                lhs = Expr::binary(BinOp::Ne, lhs, rhs);
            } else if self.kw("in").is_ok() {
                let rhs = self.relational()?;
                lhs = Expr::binary(BinOp::In, lhs, rhs);
            } else if self.kw("matches").is_ok() {
                let pattern = self.match_pattern()?;
                lhs = Expr::RegexpMatch {
                    pattern,
                    expr: Box::new(lhs),
                };
            } else {
                break;
            }
        }
        Ok(lhs)
    }

    /// The right-hand side of `matches` (and of `match(...)`): a regex
    /// literal kept verbatim, or a glob/word/string run through the glob
    /// translator.
    fn match_pattern(&mut self) -> PResult<String> {
        self.ws();
        if let Ok(body) = self.regex_literal() {
            return Ok(body);
        }
        if let Ok(text) = self.string_literal() {
            return Ok(reglob(&text, &GlobOptions::default()));
        }
        if let Ok(word) = self.search_word() {
            return Ok(reglob(&word, &GlobOptions::default()));
        }
        self.expecting("pattern")
    }

    fn relational(&mut self) -> PResult<Expr> {
        let mut lhs = self.additive()?;
        loop {
            let op = if self.tok("<=").is_ok() {
                BinOp::Le
            } else if self.tok(">=").is_ok() {
                BinOp::Ge
            } else if self.tok("<").is_ok() {
                BinOp::Lt
            } else if self.tok(">").is_ok() {
                BinOp::Gt
            } else {
                break;
            };
            let rhs = self.additive()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn additive(&mut self) -> PResult<Expr> {
        let mut lhs = self.multiplicative()?;
        loop {
            let step = self.attempt(|p| {
                let op = if p.tok("+").is_ok() {
                    BinOp::Add
                } else if p.tok("-").is_ok() {
                    BinOp::Sub
                } else {
                    return Err(Fail);
                };
                let rhs = p.multiplicative()?;
                Ok((op, rhs))
            });
            match step {
                Ok((op, rhs)) => lhs = Expr::binary(op, lhs, rhs),
                Err(_) => break,
            }
        }
        Ok(lhs)
    }

    fn multiplicative(&mut self) -> PResult<Expr> {
        let mut lhs = self.unary()?;
        loop {
            let step = self.attempt(|p| {
                let op = if p.tok("*").is_ok() {
                    BinOp::Mul
                } else if p.tok("/").is_ok() {
                    BinOp::Div
                } else {
                    return Err(Fail);
                };
                let rhs = p.unary()?;
                Ok((op, rhs))
            });
            match step {
                Ok((op, rhs)) => lhs = Expr::binary(op, lhs, rhs),
                Err(_) => break,
            }
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> PResult<Expr> {
        let bang = self.attempt(|p| {
            p.tok("!")?;
            p.not_ahead(|p| p.cur.literal("="))
        });
        if bang.is_ok() || self.kw("not").is_ok() {
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.postfix()
    }

    fn postfix(&mut self) -> PResult<Expr> {
        let mut expr = self.primary()?;
        while let Ok(step) = self.attempt(Self::postfix_step) {
            expr = match step {
                Postfix::Field(name) => Expr::binary(BinOp::Dot, expr, Expr::id(name)),
                Postfix::Method(name, mut args) => {
                    args.insert(0, expr);
                    Expr::Call { name, args }
                }
                Postfix::Index(index) => Expr::binary(BinOp::Index, expr, index),
                Postfix::Slice(from, to) => Expr::Slice {
                    expr: Box::new(expr),
                    from: from.map(Box::new),
                    to: to.map(Box::new),
                },
            };
        }
        Ok(expr)
    }

    fn postfix_step(&mut self) -> PResult<Postfix> {
        let dotted = self.attempt(|p| {
            p.ws();
            p.cur.literal(".")?;
            let name = p.identifier()?;
            if p.tok("(").is_ok() {
                let args = p.call_args()?;
                Ok(Postfix::Method(name, args))
            } else {
                Ok(Postfix::Field(name))
            }
        });
        if let Ok(step) = dotted {
            return Ok(step);
        }
        self.tok("[")?;
        let slice = self.attempt(|p| {
            let from = p.opt(Self::expr);
            p.tok(":")?;
            let to = p.opt(Self::expr);
            p.tok("]")?;
            Ok(Postfix::Slice(from, to))
        });
        if let Ok(step) = slice {
            return Ok(step);
        }
        let index = self.expr()?;
        self.tok("]")?;
        Ok(Postfix::Index(index))
    }

    fn primary(&mut self) -> PResult<Expr> {
        self.ws();
        if let Ok(prim) = self.scalar_literal() {
            return Ok(Expr::Primitive(prim));
        }
        // type(<type>) first-class type value
        if let Ok(value) = self.attempt(|p| {
            p.kw("type")?;
            p.tok("(")?;
            let t = p.type_expr()?;
            p.tok(")")?;
            Ok(t)
        }) {
            return Ok(Expr::TypeValue { value });
        }
        // select(e, ...)
        if let Ok(selectors) = self.attempt(|p| {
            p.kw_ci("select")?;
            p.tok("(")?;
            p.call_args()
        }) {
            return Ok(Expr::SelectExpr { selectors });
        }
        // match(pattern, e)
        if let Ok(expr) = self.attempt(|p| {
            p.kw_ci("match")?;
            p.tok("(")?;
            let pattern = p.match_pattern()?;
            p.tok(",")?;
            let expr = p.expr()?;
            p.tok(")")?;
            Ok(Expr::RegexpMatch {
                pattern,
                expr: Box::new(expr),
            })
        }) {
            return Ok(expr);
        }
        if let Ok(expr) = self.attempt(Self::call_or_cast) {
            return Ok(expr);
        }
        if let Ok(fields) = self.attempt(|p| {
            p.tok("{")?;
            let fields = p.record_fields()?;
            p.tok("}")?;
            Ok(fields)
        }) {
            return Ok(Expr::RecordExpr { fields });
        }
        if let Ok(exprs) = self.attempt(|p| {
            p.tok("|[")?;
            let exprs = p.opt(Self::comma_exprs).unwrap_or_default();
            p.tok("]|")?;
            Ok(exprs)
        }) {
            return Ok(Expr::SetExpr { exprs });
        }
        if let Ok(entries) = self.attempt(|p| {
            p.tok("|{")?;
            let entries = p.map_entries()?;
            p.tok("}|")?;
            Ok(entries)
        }) {
            return Ok(Expr::MapExpr { entries });
        }
        if let Ok(exprs) = self.attempt(|p| {
            p.tok("[")?;
            let exprs = p.opt(Self::comma_exprs).unwrap_or_default();
            p.tok("]")?;
            Ok(exprs)
        }) {
            return Ok(Expr::ArrayExpr { exprs });
        }
        if let Ok(expr) = self.attempt(|p| {
            p.tok("(")?;
            let e = p.expr()?;
            p.tok(")")?;
            Ok(e)
        }) {
            return Ok(expr);
        }
        if self.kw("this").is_ok() {
            return Ok(Expr::Root);
        }
        // Leading-dot field reference: the dot stays for the postfix chain.
        if self
            .attempt(|p| {
                p.ws();
                p.peek(|p| {
                    p.cur.literal(".")?;
                    p.cur
                        .char_where("A-Za-z_", |c| c.is_ascii_alphabetic() || c == '_')
                })
            })
            .is_ok()
        {
            return Ok(Expr::Root);
        }
        // Bare dot: the root value itself.
        if self
            .attempt(|p| {
                p.ws();
                p.cur.literal(".").map(|_| ())
            })
            .is_ok()
        {
            return Ok(Expr::Root);
        }
        if let Ok(name) = self.identifier() {
            return Ok(Expr::id(name));
        }
        self.expecting("expression")
    }

    fn record_fields(&mut self) -> PResult<Vec<RecordField>> {
        let mut fields = Vec::new();
        if let Ok(first) = self.attempt(Self::record_field) {
            fields.push(first);
            while let Ok(field) = self.attempt(|p| {
                p.tok(",")?;
                p.record_field()
            }) {
                fields.push(field);
            }
        }
        Ok(fields)
    }

    fn record_field(&mut self) -> PResult<RecordField> {
        self.ws();
        let name = if let Ok(name) = self.identifier() {
            name
        } else {
            self.string_literal()?
        };
        self.tok(":")?;
        let value = self.expr()?;
        Ok(RecordField { name, value })
    }

    fn map_entries(&mut self) -> PResult<Vec<MapEntry>> {
        let mut entries = Vec::new();
        if let Ok(first) = self.attempt(Self::map_entry) {
            entries.push(first);
            while let Ok(entry) = self.attempt(|p| {
                p.tok(",")?;
                p.map_entry()
            }) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn map_entry(&mut self) -> PResult<MapEntry> {
        let key = self.expr()?;
        self.tok(":")?;
        let value = self.expr()?;
        Ok(MapEntry { key, value })
    }

    pub(crate) fn primitive_type_name(&mut self) -> PResult<String> {
        self.attempt(|p| {
            p.ws();
            for name in PRIMITIVE_TYPES {
                let hit = p.attempt(|p| {
                    p.cur.literal(name)?;
                    p.not_ahead(|p| p.ident_char())
                });
                if hit.is_ok() {
                    return Ok((*name).to_string());
                }
            }
            Err(Fail)
        })
    }

    /// `typename(e)` is a cast; any other `name(args)` is a call.
    fn call_or_cast(&mut self) -> PResult<Expr> {
        self.attempt(|p| {
            if let Ok(name) = p.primitive_type_name() {
                p.tok("(")?;
                let expr = p.expr()?;
                p.tok(")")?;
                return Ok(Expr::Cast {
                    expr: Box::new(expr),
                    typ: Type::TypePrimitive { name },
                });
            }
            p.ws();
            let name = p.identifier()?;
            p.tok("(")?;
            let args = p.call_args()?;
            Ok(Expr::Call { name, args })
        })
    }

    /// Comma-separated arguments up to the closing parenthesis (which is
    /// consumed).
    pub(crate) fn call_args(&mut self) -> PResult<Vec<Expr>> {
        let args = self.opt(Self::comma_exprs).unwrap_or_default();
        self.tok(")")?;
        Ok(args)
    }

    pub(crate) fn comma_exprs(&mut self) -> PResult<Vec<Expr>> {
        let first = self.expr()?;
        let mut exprs = vec![first];
        while let Ok(e) = self.attempt(|p| {
            p.tok(",")?;
            p.expr()
        }) {
            exprs.push(e);
        }
        Ok(exprs)
    }

    // ------------------------------------------------------------------
    // Assignments
    // ------------------------------------------------------------------

    /// A deref chain rooted at `this`, a leading dot, or an identifier; the
    /// only shape allowed on the left of `:=`.
    pub(crate) fn lvalue(&mut self) -> PResult<Expr> {
        self.attempt(|p| {
            p.ws();
            let mut expr = if p.kw("this").is_ok() {
                Expr::Root
            } else if p
                .peek(|p| {
                    p.cur.literal(".")?;
                    p.cur
                        .char_where("A-Za-z_", |c| c.is_ascii_alphabetic() || c == '_')
                })
                .is_ok()
            {
                Expr::Root
            } else {
                Expr::id(p.identifier()?)
            };
            loop {
                if let Ok(name) = p.attempt(|p| {
                    p.ws();
                    p.cur.literal(".")?;
                    p.identifier()
                }) {
                    expr = Expr::binary(BinOp::Dot, expr, Expr::id(name));
                    continue;
                }
                if let Ok(index) = p.attempt(|p| {
                    p.tok("[")?;
                    let i = p.expr()?;
                    p.tok("]")?;
                    Ok(i)
                }) {
                    expr = Expr::binary(BinOp::Index, expr, index);
                    continue;
                }
                break;
            }
            Ok(expr)
        })
    }

    /// `lhs := rhs`
    pub(crate) fn strict_assignment(&mut self) -> PResult<Expr> {
        self.attempt(|p| {
            let lhs = p.lvalue()?;
            p.tok(":=")?;
            let rhs = p.expr()?;
            Ok(Expr::assign(Some(lhs), rhs))
        })
    }

    /// `[lhs :=] rhs` - the field-assignment form used by cut/pick/put and
    /// aggregation keys.
    pub(crate) fn assignment_item(&mut self) -> PResult<Expr> {
        if let Ok(a) = self.strict_assignment() {
            return Ok(a);
        }
        let rhs = self.expr()?;
        Ok(Expr::assign(None, rhs))
    }

    pub(crate) fn assignment_list(&mut self) -> PResult<Vec<Expr>> {
        let first = self.assignment_item()?;
        let mut items = vec![first];
        while let Ok(item) = self.attempt(|p| {
            p.tok(",")?;
            p.assignment_item()
        }) {
            items.push(item);
        }
        Ok(items)
    }

    // ------------------------------------------------------------------
    // Search booleans
    // ------------------------------------------------------------------

    /// The argument of `filter` and of bare search stages: predicates and
    /// search terms combined with `and`/`or`/`not` and parentheses.
    pub(crate) fn search_bool(&mut self) -> PResult<Expr> {
        let mut lhs = self.search_and()?;
        while let Ok(rhs) = self.attempt(|p| {
            p.kw("or")?;
            p.search_and()
        }) {
            lhs = Expr::binary(BinOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn search_and(&mut self) -> PResult<Expr> {
        let mut lhs = self.search_factor()?;
        while let Ok(rhs) = self.attempt(|p| {
            p.kw("and")?;
            p.search_factor()
        }) {
            lhs = Expr::binary(BinOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn search_factor(&mut self) -> PResult<Expr> {
        self.ws();
        let bang = self.attempt(|p| {
            p.tok("!")?;
            p.not_ahead(|p| p.cur.literal("="))
        });
        if bang.is_ok() || self.kw("not").is_ok() {
            let operand = self.search_factor()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        if let Ok(pred) = self.attempt(Self::search_pred) {
            return Ok(pred);
        }
        if let Ok(group) = self.attempt(|p| {
            p.tok("(")?;
            let e = p.search_bool()?;
            p.tok(")")?;
            Ok(e)
        }) {
            return Ok(group);
        }
        self.search_term()
    }

    /// A comparison predicate: an equality-level expression whose top node
    /// actually compares (so a lone field reference falls through to the
    /// search-term rule instead).
    fn search_pred(&mut self) -> PResult<Expr> {
        self.attempt(|p| {
            let e = p.equality()?;
            let is_pred = matches!(
                &e,
                Expr::Binary {
                    op: BinOp::Eq
                        | BinOp::Ne
                        | BinOp::In
                        | BinOp::Lt
                        | BinOp::Le
                        | BinOp::Gt
                        | BinOp::Ge,
                    ..
                } | Expr::RegexpMatch { .. }
            );
            if is_pred {
                Ok(e)
            } else {
                Err(Fail)
            }
        })
    }

    fn search_term(&mut self) -> PResult<Expr> {
        self.ws();
        if let Ok(pattern) = self.regex_literal() {
            return Ok(Expr::RegexpSearch { pattern });
        }
        // `*` matches everything.
        if self
            .attempt(|p| {
                p.cur.literal("*")?;
                p.not_ahead(|p| {
                    p.cur.char_where("A-Za-z0-9_.*?", |c| {
                        c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '*' | '?')
                    })
                })
            })
            .is_ok()
        {
            return Ok(Expr::Search {
                text: "*".to_string(),
                value: Primitive::new("bool", "true"),
            });
        }
        // A typed literal: keep the lexeme as written alongside the decoded
        // value.
        if let Ok(term) = self.attempt(|p| {
            let start = p.cur.pos();
            let value = p.scalar_literal()?;
            Ok(Expr::Search {
                text: p.cur.slice_from(start).to_string(),
                value,
            })
        }) {
            return Ok(term);
        }
        if let Ok(word) = self.search_word() {
            if is_globby(&word) {
                return Ok(Expr::RegexpSearch {
                    pattern: reglob(&word, &GlobOptions::default()),
                });
            }
            return Ok(Expr::Search {
                text: word.clone(),
                value: Primitive::new("string", word),
            });
        }
        self.expecting("search term")
    }
}
