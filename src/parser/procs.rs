//! Pipeline stages: one rule per operator, plus the ordered dispatch that
//! decides between named operators, aggregations, assignments, and the
//! implicit filter.

use crate::ast::{Expr, JoinStyle, NullsOrder, Proc, SortOrder};
use crate::cursor::{Fail, PResult};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// A single leaf stage. `split`, `switch` and `from` groups are handled
    /// one level up, in the program assembler.
    pub(crate) fn proc(&mut self) -> PResult<Proc> {
        self.ws();
        if let Ok(p) = self.attempt(Self::sql_proc) {
            return Ok(p);
        }
        if let Ok(p) = self.attempt(Self::sort_proc) {
            return Ok(p);
        }
        if let Ok(p) = self.attempt(Self::top_proc) {
            return Ok(p);
        }
        if let Ok(args) = self.attempt(|p| {
            p.kw("cut")?;
            p.assignment_list()
        }) {
            return Ok(Proc::Cut { args });
        }
        if let Ok(args) = self.attempt(|p| {
            p.kw("pick")?;
            p.assignment_list()
        }) {
            return Ok(Proc::Pick { args });
        }
        if let Ok(args) = self.attempt(|p| {
            p.kw("drop")?;
            p.comma_exprs()
        }) {
            return Ok(Proc::Drop { args });
        }
        if let Ok(count) = self.attempt(|p| {
            p.kw("head")?;
            Ok(p.opt(Self::uint_value).unwrap_or(1))
        }) {
            return Ok(Proc::Head { count });
        }
        if let Ok(count) = self.attempt(|p| {
            p.kw("tail")?;
            Ok(p.opt(Self::uint_value).unwrap_or(1))
        }) {
            return Ok(Proc::Tail { count });
        }
        if let Ok(expr) = self.attempt(|p| {
            p.kw("filter")?;
            p.search_bool()
        }) {
            return Ok(Proc::Filter { expr });
        }
        if let Ok(cflag) = self.attempt(|p| {
            p.kw("uniq")?;
            Ok(p.attempt(|p| {
                p.tok("-c")?;
                p.boundary()
            })
            .is_ok())
        }) {
            return Ok(Proc::Uniq { cflag });
        }
        if let Ok(args) = self.attempt(|p| {
            p.kw("put")?;
            p.assignment_list()
        }) {
            return Ok(Proc::Put { args });
        }
        if let Ok(args) = self.attempt(|p| {
            p.kw("rename")?;
            let first = p.strict_assignment()?;
            let mut items = vec![first];
            while let Ok(item) = p.attempt(|p| {
                p.tok(",")?;
                p.strict_assignment()
            }) {
                items.push(item);
            }
            Ok(items)
        }) {
            return Ok(Proc::Rename { args });
        }
        // `fuse(` and `shape(` stay available as function calls.
        if let Ok(()) = self.attempt(|p| {
            p.kw("fuse")?;
            p.not_ahead(|p| p.tok("("))
        }) {
            return Ok(Proc::Fuse);
        }
        if let Ok(()) = self.attempt(|p| {
            p.kw("shape")?;
            p.not_ahead(|p| p.tok("("))
        }) {
            return Ok(Proc::Shape);
        }
        if let Ok(p) = self.attempt(Self::join_proc) {
            return Ok(p);
        }
        if let Ok(p) = self.attempt(Self::sample_proc) {
            return Ok(p);
        }
        if let Ok(p) = self.attempt(Self::explode_proc) {
            return Ok(p);
        }
        if self.kw("pass").is_ok() {
            return Ok(Proc::Pass);
        }
        if let Ok(p) = self.attempt(|p| {
            p.kw("summarize")?;
            p.summarize_body()
        }) {
            return Ok(p);
        }
        if let Ok(p) = self.attempt(Self::bare_summarize) {
            return Ok(p);
        }
        if let Ok(assignments) = self.attempt(Self::op_assignments) {
            return Ok(Proc::OpAssignment { assignments });
        }
        let expr = self.search_bool()?;
        Ok(Proc::Filter { expr })
    }

    fn sort_proc(&mut self) -> PResult<Proc> {
        self.kw("sort")?;
        let mut order = SortOrder::Asc;
        let mut nulls = None;
        loop {
            if self
                .attempt(|p| {
                    p.tok("-r")?;
                    p.boundary()
                })
                .is_ok()
            {
                order = SortOrder::Desc;
                continue;
            }
            let n = self.attempt(|p| {
                p.tok("-nulls")?;
                p.boundary()?;
                if p.kw("first").is_ok() {
                    Ok(NullsOrder::First)
                } else if p.kw("last").is_ok() {
                    Ok(NullsOrder::Last)
                } else {
                    Err(Fail)
                }
            });
            if let Ok(n) = n {
                nulls = Some(n);
                continue;
            }
            break;
        }
        let _ = self.kw("by");
        let args = self.opt(Self::comma_exprs).unwrap_or_default();
        Ok(Proc::Sort { order, nulls, args })
    }

    fn top_proc(&mut self) -> PResult<Proc> {
        self.kw("top")?;
        let mut limit = None;
        let mut flush = false;
        loop {
            if self
                .attempt(|p| {
                    p.tok("-flush")?;
                    p.boundary()
                })
                .is_ok()
            {
                flush = true;
                continue;
            }
            if limit.is_none() {
                if let Ok(n) = self.attempt(Self::uint_value) {
                    limit = Some(n);
                    continue;
                }
            }
            break;
        }
        let args = self.opt(Self::comma_exprs).unwrap_or_default();
        Ok(Proc::Top { limit, flush, args })
    }

    /// `[anti|inner|left|right] join on <key>=<key> [with <assignments>]`
    fn join_proc(&mut self) -> PResult<Proc> {
        let style = if self.kw("anti").is_ok() {
            JoinStyle::Anti
        } else if self.kw("inner").is_ok() {
            JoinStyle::Inner
        } else if self.kw("left").is_ok() {
            JoinStyle::Left
        } else if self.kw("right").is_ok() {
            JoinStyle::Right
        } else {
            JoinStyle::Inner
        };
        self.kw("join")?;
        self.kw("on")?;
        let left_key = self.lvalue()?;
        self.attempt(|p| {
            p.tok("=")?;
            p.not_ahead(|p| p.cur.literal("="))
        })?;
        let right_key = self.lvalue()?;
        let with = self.kw("with").is_ok()
            || self
                .attempt(|p| {
                    p.tok("-with")?;
                    p.boundary()
                })
                .is_ok();
        let args = if with {
            self.assignment_list()?
        } else {
            Vec::new()
        };
        Ok(Proc::Join {
            style,
            left_key,
            right_key,
            args,
        })
    }

    /// `sample [e]` rewrites to a summarize over the shape of `e` (default
    /// the whole value) followed by a cut of the sampled column.
    fn sample_proc(&mut self) -> PResult<Proc> {
        self.kw("sample")?;
        let e = self.opt(Self::expr).unwrap_or(Expr::Root);
        let agg = Expr::assign(
            Some(Expr::id("sample")),
            Expr::Call {
                name: "any".to_string(),
                args: vec![e.clone()],
            },
        );
        let key = Expr::assign(
            Some(Expr::id("shape")),
            Expr::Call {
                name: "typeof".to_string(),
                args: vec![e],
            },
        );
        Ok(Proc::Sequential {
            procs: vec![
                Proc::Summarize {
                    duration: None,
                    aggs: vec![agg],
                    keys: vec![key],
                    limit: None,
                },
                Proc::Cut {
                    args: vec![Expr::assign(None, Expr::id("sample"))],
                },
            ],
        })
    }

    fn explode_proc(&mut self) -> PResult<Proc> {
        self.kw("explode")?;
        let args = self.comma_exprs()?;
        let dashed = self
            .attempt(|p| {
                p.tok("-by")?;
                p.boundary()
            })
            .is_ok();
        if !dashed {
            self.kw("by")?;
        }
        let typ = self.type_expr()?;
        let as_field = self.opt(|p| {
            p.kw("as")?;
            p.lvalue()
        });
        Ok(Proc::Explode {
            args,
            typ,
            as_field,
        })
    }

    /// The clause train shared by `summarize` and the bare aggregation form:
    /// `[every <dur>] <aggs> [by <keys>] [limit <n>]`.
    fn summarize_body(&mut self) -> PResult<Proc> {
        let duration = self.opt(|p| {
            p.kw_ci("every")?;
            p.ws();
            p.duration()
        });
        let first = self.agg_item()?;
        let mut aggs = vec![first];
        while let Ok(item) = self.attempt(|p| {
            p.tok(",")?;
            p.agg_item()
        }) {
            aggs.push(item);
        }
        let keys = self
            .opt(|p| {
                p.kw("by")?;
                p.assignment_list()
            })
            .unwrap_or_default();
        let limit = self.opt(|p| {
            p.kw_ci("limit")?;
            p.uint_value()
        });
        Ok(Proc::Summarize {
            duration,
            aggs,
            keys,
            limit,
        })
    }

    /// `[lhs :=] func(args)` - an aggregation column. The call shape is what
    /// distinguishes a bare aggregation from a search.
    fn agg_item(&mut self) -> PResult<Expr> {
        self.attempt(|p| {
            let lhs = p.opt(|p| {
                let l = p.lvalue()?;
                p.tok(":=")?;
                Ok(l)
            });
            p.ws();
            let name = p.identifier()?;
            p.tok("(")?;
            let args = p.call_args()?;
            Ok(Expr::assign(lhs, Expr::Call { name, args }))
        })
    }

    /// Keyword-less aggregation, e.g. `count() by id`. Requires a stage
    /// terminator after the clauses so `f(x) > 1` stays a filter.
    fn bare_summarize(&mut self) -> PResult<Proc> {
        self.attempt(|p| {
            let proc = p.summarize_body()?;
            p.stage_end()?;
            Ok(proc)
        })
    }

    /// Lookahead for the end of a stage: `|`, `)`, `;`, `=>` or end of
    /// input. Consumes nothing.
    fn stage_end(&mut self) -> PResult<()> {
        self.peek(|p| {
            p.ws();
            if p.cur.at_end() {
                return Ok(());
            }
            let rest = p.cur.rest();
            if rest.starts_with('|')
                || rest.starts_with(')')
                || rest.starts_with(';')
                || rest.starts_with("=>")
            {
                Ok(())
            } else {
                Err(Fail)
            }
        })
    }

    fn op_assignments(&mut self) -> PResult<Vec<Expr>> {
        let first = self.strict_assignment()?;
        let mut items = vec![first];
        while let Ok(item) = self.attempt(|p| {
            p.tok(",")?;
            p.strict_assignment()
        }) {
            items.push(item);
        }
        Ok(items)
    }
}
