//! Top level: leading declarations, `|`-chained pipelines, and the grouping
//! forms `split`, `switch` and `from`.

use crate::ast::{Proc, SwitchCase, Trunk};
use crate::cursor::PResult;
use crate::parser::Parser;

/// Appends `proc` to `procs`, flattening nested sequentials so rewrites
/// (like `sample`) splice into the enclosing pipeline.
fn splice(procs: &mut Vec<Proc>, proc: Proc) {
    match proc {
        Proc::Sequential { procs: inner } => procs.extend(inner),
        other => procs.push(other),
    }
}

impl<'a> Parser<'a> {
    /// Declarations, then the pipeline. The result is always a Sequential,
    /// even for a single stage.
    pub(crate) fn program(&mut self) -> PResult<Proc> {
        let mut procs = Vec::new();
        loop {
            if let Ok(decl) = self.attempt(Self::const_decl) {
                procs.push(decl);
                let _ = self.tok(";");
                continue;
            }
            if let Ok(decl) = self.attempt(Self::type_decl) {
                procs.push(decl);
                let _ = self.tok(";");
                continue;
            }
            break;
        }
        let pipeline = self.pipeline()?;
        splice(&mut procs, pipeline);
        Ok(Proc::Sequential { procs })
    }

    fn const_decl(&mut self) -> PResult<Proc> {
        self.kw("const")?;
        self.ws();
        let name = self.identifier()?;
        self.tok("=")?;
        let expr = self.expr()?;
        Ok(Proc::Const { name, expr })
    }

    fn type_decl(&mut self) -> PResult<Proc> {
        self.kw("type")?;
        self.ws();
        let name = self.identifier()?;
        self.tok("=")?;
        let typ = self.type_expr()?;
        Ok(Proc::TypeDef { name, typ })
    }

    pub(crate) fn pipeline(&mut self) -> PResult<Proc> {
        let first = self.proc_or_group()?;
        let mut procs = Vec::new();
        splice(&mut procs, first);
        while let Ok(next) = self.attempt(|p| {
            p.tok("|")?;
            p.proc_or_group()
        }) {
            splice(&mut procs, next);
        }
        Ok(Proc::Sequential { procs })
    }

    fn proc_or_group(&mut self) -> PResult<Proc> {
        self.ws();
        if let Ok(proc) = self.attempt(Self::split_group) {
            return Ok(proc);
        }
        if let Ok(proc) = self.attempt(Self::switch_proc) {
            return Ok(proc);
        }
        if let Ok(proc) = self.attempt(Self::from_proc) {
            return Ok(proc);
        }
        self.proc()
    }

    /// `split ( => pipeline; => pipeline; ... )`
    fn split_group(&mut self) -> PResult<Proc> {
        self.kw("split")?;
        self.tok("(")?;
        let mut procs = Vec::new();
        self.tok("=>")?;
        procs.push(self.pipeline()?);
        while let Ok(branch) = self.attempt(|p| {
            p.tok(";")?;
            p.tok("=>")?;
            p.pipeline()
        }) {
            procs.push(branch);
        }
        let _ = self.tok(";");
        self.tok(")")?;
        Ok(Proc::Parallel { procs })
    }

    /// `switch [expr] ( case e => pipeline; ...; default => pipeline )`
    fn switch_proc(&mut self) -> PResult<Proc> {
        self.kw("switch")?;
        let expr = self.opt(|p| {
            p.not_ahead(|p| p.tok("("))?;
            p.expr()
        });
        self.tok("(")?;
        let mut cases = vec![self.switch_case()?];
        while let Ok(case) = self.attempt(|p| {
            p.tok(";")?;
            p.switch_case()
        }) {
            cases.push(case);
        }
        let _ = self.tok(";");
        self.tok(")")?;
        Ok(Proc::Switch { expr, cases })
    }

    fn switch_case(&mut self) -> PResult<SwitchCase> {
        if self.kw("default").is_ok() {
            self.tok("=>")?;
            let proc = self.pipeline()?;
            return Ok(SwitchCase { expr: None, proc });
        }
        self.kw("case")?;
        let expr = self.search_bool()?;
        self.tok("=>")?;
        let proc = self.pipeline()?;
        Ok(SwitchCase {
            expr: Some(expr),
            proc,
        })
    }

    /// `from ( trunk; trunk; ... )` or the single-source shorthand
    /// `from <pool>`.
    fn from_proc(&mut self) -> PResult<Proc> {
        self.kw("from")?;
        if self.tok("(").is_ok() {
            let mut trunks = vec![self.trunk()?];
            while let Ok(trunk) = self.attempt(|p| {
                p.tok(";")?;
                p.trunk()
            }) {
                trunks.push(trunk);
            }
            let _ = self.tok(";");
            self.tok(")")?;
            return Ok(Proc::From { trunks });
        }
        self.ws();
        let name = if let Ok(text) = self.string_literal() {
            text
        } else {
            self.identifier()?
        };
        Ok(Proc::From {
            trunks: vec![Trunk {
                source: Proc::Pool { name },
                seq: None,
            }],
        })
    }

    fn trunk(&mut self) -> PResult<Trunk> {
        let source = self.source()?;
        let seq = self
            .opt(|p| {
                p.tok("=>")?;
                p.pipeline()
            })
            .map(Box::new);
        Ok(Trunk { source, seq })
    }

    fn source(&mut self) -> PResult<Proc> {
        self.ws();
        if self.kw("file").is_ok() {
            self.ws();
            let path = if let Ok(text) = self.string_literal() {
                text
            } else {
                self.path_word()?
            };
            let format = self.opt(|p| {
                p.kw("format")?;
                p.ws();
                p.identifier()
            });
            return Ok(Proc::File { path, format });
        }
        if let Ok(url) = self.attempt(Self::url_lexeme) {
            let format = self.opt(|p| {
                p.kw("format")?;
                p.ws();
                p.identifier()
            });
            return Ok(Proc::Http { url, format });
        }
        if self.kw("pool").is_ok() {
            self.ws();
            let name = if let Ok(text) = self.string_literal() {
                text
            } else {
                self.identifier()?
            };
            return Ok(Proc::Pool { name });
        }
        self.ws();
        let name = if let Ok(text) = self.string_literal() {
            text
        } else {
            self.identifier()?
        };
        Ok(Proc::Pool { name })
    }

    fn path_word(&mut self) -> PResult<String> {
        let start = self.cur.pos();
        self.cur.char_where("file path", |c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-')
        })?;
        while self
            .attempt(|p| {
                p.cur.char_where("file path", |c| {
                    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-')
                })
            })
            .is_ok()
        {}
        Ok(self.cur.slice_from(start).to_string())
    }

    /// `http://...` or `https://...`, running to the next delimiter.
    fn url_lexeme(&mut self) -> PResult<String> {
        self.ws();
        let start = self.cur.pos();
        self.cur.literal_ci("http")?;
        let _ = self.cur.literal_ci("s");
        self.cur.literal("://")?;
        self.cur.char_where("URL", is_url_char)?;
        while self.attempt(|p| p.cur.char_where("URL", is_url_char)).is_ok() {}
        Ok(self.cur.slice_from(start).to_string())
    }
}

fn is_url_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ')' | ';' | '|')
}
