//! Lexical micro-grammars: the self-contained parsers for every literal
//! form. Each returns a decoded [`Primitive`] or lexeme; none of them skip
//! leading whitespace (callers do).

use crate::ast::Primitive;
use crate::cursor::PResult;
use crate::parser::{Parser, RESERVED_WORDS};

impl<'a> Parser<'a> {
    // ------------------------------------------------------------------
    // Numbers
    // ------------------------------------------------------------------

    fn digits1(&mut self) -> PResult<&'a str> {
        let start = self.cur.pos();
        self.cur.char_where("0-9", |c| c.is_ascii_digit())?;
        while self
            .attempt(|p| p.cur.char_where("0-9", |c| c.is_ascii_digit()))
            .is_ok()
        {}
        Ok(self.cur.slice_from(start))
    }

    fn exact_digits(&mut self, n: usize) -> PResult<()> {
        for _ in 0..n {
            self.cur.char_where("0-9", |c| c.is_ascii_digit())?;
        }
        Ok(())
    }

    fn hex_digit(&mut self) -> PResult<char> {
        self.cur.char_where("0-9a-fA-F", |c| c.is_ascii_hexdigit())
    }

    /// Unsigned decimal integer used structurally (head counts, limits).
    pub(crate) fn uint_value(&mut self) -> PResult<u64> {
        self.attempt(|p| {
            p.ws();
            let text = p.digits1()?;
            p.boundary()?;
            match text.parse::<u64>() {
                Ok(n) => Ok(n),
                Err(_) => p.expecting("unsigned integer"),
            }
        })
    }

    fn float_lexeme(&mut self) -> PResult<&'a str> {
        self.attempt(|p| {
            let start = p.cur.pos();
            let _ = p.opt(|p| p.cur.literal("-"));
            let _ = p.opt(Self::digits1);
            p.cur.literal(".")?;
            p.digits1()?;
            let _ = p.opt(|p| {
                p.cur.char_where("eE", |c| c == 'e' || c == 'E')?;
                let _ = p.opt(|p| p.cur.char_where("+-", |c| c == '+' || c == '-'));
                p.digits1()
            });
            p.boundary()?;
            Ok(p.cur.slice_from(start))
        })
    }

    fn int_lexeme(&mut self) -> PResult<&'a str> {
        self.attempt(|p| {
            let start = p.cur.pos();
            let _ = p.opt(|p| p.cur.literal("-"));
            p.digits1()?;
            p.boundary()?;
            Ok(p.cur.slice_from(start))
        })
    }

    pub(crate) fn number(&mut self) -> PResult<Primitive> {
        if let Ok(text) = self.float_lexeme() {
            return Ok(Primitive::new("float64", text));
        }
        let text = self.int_lexeme()?;
        Ok(Primitive::new("int64", text))
    }

    // ------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------

    /// Double- or single-quoted string with escape decoding.
    pub(crate) fn string_literal(&mut self) -> PResult<String> {
        self.attempt(|p| {
            let quote = p.cur.char_where("\"'", |c| c == '"' || c == '\'')?;
            let mut out = String::new();
            loop {
                if p.attempt(|p| p.cur.char_where("quote", |c| c == quote)).is_ok() {
                    return Ok(out);
                }
                if p.attempt(|p| p.cur.literal("\\")).is_ok() {
                    p.escape_sequence(&mut out)?;
                    continue;
                }
                let c = p.cur.char_not("control", |c| c.is_control())?;
                out.push(c);
            }
        })
    }

    fn hex_value(&mut self, digits: usize) -> PResult<u32> {
        let start = self.cur.pos();
        for _ in 0..digits {
            self.hex_digit()?;
        }
        let text = self.cur.slice_from(start);
        u32::from_str_radix(text, 16).map_err(|_| crate::cursor::Fail)
    }

    /// Decodes one escape sequence (the backslash is already consumed).
    fn escape_sequence(&mut self, out: &mut String) -> PResult<()> {
        let c = self.cur.any_char()?;
        match c {
            '"' | '\'' | '\\' => out.push(c),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{000B}'),
            'x' => {
                let v = self.hex_value(2)?;
                match char::from_u32(v) {
                    Some(c) => out.push(c),
                    None => return Err(crate::cursor::Fail),
                }
            }
            'u' => {
                let v = self.unicode_escape_value()?;
                self.push_code_unit(v, out)?;
            }
            _ => return self.expecting("escape sequence"),
        }
        Ok(())
    }

    /// `\uHHHH` (already past the `u`) or `\u{H..H}` with 1-6 hex digits.
    fn unicode_escape_value(&mut self) -> PResult<u32> {
        if self.attempt(|p| p.cur.literal("{")).is_ok() {
            let start = self.cur.pos();
            self.hex_digit()?;
            for _ in 0..5 {
                if self.attempt(Self::hex_digit).is_err() {
                    break;
                }
            }
            let text = self.cur.slice_from(start);
            self.cur.literal("}")?;
            return u32::from_str_radix(text, 16).map_err(|_| crate::cursor::Fail);
        }
        self.hex_value(4)
    }

    /// Pushes a decoded `\u` value. A `\uHHHH` high surrogate pairs with an
    /// immediately following `\uHHHH` low surrogate (the source encodes one
    /// supplementary character as UTF-16); an unpaired surrogate half decodes
    /// to U+FFFD.
    fn push_code_unit(&mut self, v: u32, out: &mut String) -> PResult<()> {
        match v {
            0xD800..=0xDBFF => {
                let low = self.opt(|p| {
                    p.cur.literal("\\u")?;
                    let low = p.hex_value(4)?;
                    if (0xDC00..=0xDFFF).contains(&low) {
                        Ok(low)
                    } else {
                        Err(crate::cursor::Fail)
                    }
                });
                match low {
                    Some(low) => {
                        let cp = 0x10000 + ((v - 0xD800) << 10) + (low - 0xDC00);
                        match char::from_u32(cp) {
                            Some(c) => out.push(c),
                            None => out.push('\u{FFFD}'),
                        }
                    }
                    None => out.push('\u{FFFD}'),
                }
            }
            0xDC00..=0xDFFF => out.push('\u{FFFD}'),
            _ => match char::from_u32(v) {
                Some(c) => out.push(c),
                None => return Err(crate::cursor::Fail),
            },
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Durations and timestamps
    // ------------------------------------------------------------------

    fn duration_unit(&mut self) -> PResult<()> {
        // Two-letter units first so "ms" is not read as minutes + stray 's'.
        for unit in ["ns", "us", "ms", "s", "m", "h", "d", "w", "y"] {
            if self.attempt(|p| p.cur.literal_ci(unit)).is_ok() {
                return Ok(());
            }
        }
        Err(crate::cursor::Fail)
    }

    /// One or more `<decimal><unit>` pairs, e.g. `90m30s` or `-1.5h`.
    pub(crate) fn duration(&mut self) -> PResult<Primitive> {
        self.attempt(|p| {
            let start = p.cur.pos();
            let _ = p.opt(|p| p.cur.literal("-"));
            p.many1(|p| {
                p.digits1()?;
                let _ = p.opt(|p| {
                    p.cur.literal(".")?;
                    p.digits1()
                });
                p.duration_unit()
            })?;
            p.boundary()?;
            Ok(Primitive::new("duration", p.cur.slice_from(start)))
        })
    }

    /// `YYYY-MM-DDThh:mm:ss[.frac]` followed by `Z` or `±hh:mm[.frac]`.
    pub(crate) fn timestamp(&mut self) -> PResult<Primitive> {
        self.attempt(|p| {
            let start = p.cur.pos();
            p.exact_digits(4)?;
            p.cur.literal("-")?;
            p.exact_digits(2)?;
            p.cur.literal("-")?;
            p.exact_digits(2)?;
            p.cur.literal("T")?;
            p.exact_digits(2)?;
            p.cur.literal(":")?;
            p.exact_digits(2)?;
            p.cur.literal(":")?;
            p.exact_digits(2)?;
            let _ = p.opt(|p| {
                p.cur.literal(".")?;
                p.digits1()
            });
            if p.attempt(|p| p.cur.literal("Z")).is_err() {
                p.cur.char_where("+-", |c| c == '+' || c == '-')?;
                p.exact_digits(2)?;
                p.cur.literal(":")?;
                p.exact_digits(2)?;
                let _ = p.opt(|p| {
                    p.cur.literal(".")?;
                    p.digits1()
                });
            }
            p.boundary()?;
            Ok(Primitive::new("time", p.cur.slice_from(start)))
        })
    }

    // ------------------------------------------------------------------
    // IP addresses and subnets
    // ------------------------------------------------------------------

    fn ipv4_lexeme(&mut self) -> PResult<()> {
        self.attempt(|p| {
            p.digits1()?;
            for _ in 0..3 {
                p.cur.literal(".")?;
                p.digits1()?;
            }
            Ok(())
        })
    }

    /// One to four hex digits.
    fn hex_group(&mut self) -> PResult<()> {
        self.hex_digit()?;
        for _ in 0..3 {
            if self.attempt(Self::hex_digit).is_err() {
                break;
            }
        }
        Ok(())
    }

    /// `(group ":")* (ipv4 | group)` - the part after a `::`.
    fn ipv6_rest(&mut self) -> PResult<()> {
        self.many0(|p| {
            p.hex_group()?;
            p.cur.literal(":").map(|_| ())
        });
        if self.attempt(Self::ipv4_lexeme).is_ok() {
            return Ok(());
        }
        self.hex_group()
    }

    fn ipv6_lexeme(&mut self) -> PResult<()> {
        // Fully expanded: six "group:" then either an embedded IPv4 or two
        // final groups.
        let full = self.attempt(|p| {
            for _ in 0..6 {
                p.hex_group()?;
                p.cur.literal(":")?;
            }
            if p.attempt(Self::ipv4_lexeme).is_ok() {
                return Ok(());
            }
            p.hex_group()?;
            p.cur.literal(":")?;
            p.hex_group()
        });
        if full.is_ok() {
            return Ok(());
        }
        // Compressed with a head: `head::`, `head::tail`.
        let compressed = self.attempt(|p| {
            p.hex_group()?;
            many_head_groups(p);
            p.cur.literal("::")?;
            let _ = p.opt(Self::ipv6_rest);
            Ok(())
        });
        if compressed.is_ok() {
            return Ok(());
        }
        // Leading `::`, `::tail`.
        self.attempt(|p| {
            p.cur.literal("::")?;
            let _ = p.opt(Self::ipv6_rest);
            Ok(())
        })
    }

    /// An IPv4/IPv6 address, or a subnet when followed by `/<prefix>`.
    pub(crate) fn ip_or_net(&mut self) -> PResult<Primitive> {
        self.attempt(|p| {
            let start = p.cur.pos();
            if p.attempt(Self::ipv6_lexeme).is_err() {
                p.ipv4_lexeme()?;
            }
            let prefix = p.opt(|p| {
                p.cur.literal("/")?;
                p.digits1()
            });
            // Reject when the address runs into a longer word or another
            // dotted component.
            p.not_ahead(|p| {
                p.cur
                    .char_where("A-Za-z0-9_.", |c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
            })?;
            let typ = if prefix.is_some() { "net" } else { "ip" };
            Ok(Primitive::new(typ, p.cur.slice_from(start)))
        })
    }

    // ------------------------------------------------------------------
    // Byte literals
    // ------------------------------------------------------------------

    /// `0x` plus any number of hex digits, captured verbatim.
    pub(crate) fn bytes_literal(&mut self) -> PResult<Primitive> {
        self.attempt(|p| {
            let start = p.cur.pos();
            p.cur.literal("0x")?;
            while p.attempt(Self::hex_digit).is_ok() {}
            p.boundary()?;
            Ok(Primitive::new("bytes", p.cur.slice_from(start)))
        })
    }

    // ------------------------------------------------------------------
    // Identifiers, keywords, words
    // ------------------------------------------------------------------

    /// Matches any reserved word, requiring the word to end at an identifier
    /// boundary: `true` is reserved but `trueX` is an ordinary identifier.
    fn reserved_word(&mut self) -> PResult<()> {
        for word in RESERVED_WORDS {
            let hit = self.attempt(|p| {
                p.cur.literal(word)?;
                p.not_ahead(|p| p.ident_char())
            });
            if hit.is_ok() {
                return Ok(());
            }
        }
        Err(crate::cursor::Fail)
    }

    /// Identifier with the reserved-word guard.
    pub(crate) fn identifier(&mut self) -> PResult<String> {
        self.attempt(|p| {
            p.not_ahead(Self::reserved_word)?;
            let start = p.cur.pos();
            if p
                .attempt(|p| p.cur.char_where("A-Za-z_", |c| c.is_ascii_alphabetic() || c == '_'))
                .is_err()
            {
                return p.expecting("identifier");
            }
            while p.attempt(Self::ident_char).is_ok() {}
            Ok(p.cur.slice_from(start).to_string())
        })
    }

    /// Bare search word; may contain glob metacharacters.
    pub(crate) fn search_word(&mut self) -> PResult<String> {
        self.attempt(|p| {
            let start = p.cur.pos();
            p.cur.char_where("A-Za-z0-9_*?", |c| {
                c.is_ascii_alphanumeric() || matches!(c, '_' | '*' | '?')
            })?;
            while p
                .attempt(|p| {
                    p.cur.char_where("A-Za-z0-9_.*?-", |c| {
                        c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '*' | '?' | '-')
                    })
                })
                .is_ok()
            {}
            Ok(p.cur.slice_from(start).to_string())
        })
    }

    /// `/.../` regex literal. The body is kept verbatim except that `\/`
    /// unescapes to `/`.
    pub(crate) fn regex_literal(&mut self) -> PResult<String> {
        self.attempt(|p| {
            p.cur.literal("/")?;
            let mut body = String::new();
            loop {
                if p.attempt(|p| p.cur.literal("\\/")).is_ok() {
                    body.push('/');
                    continue;
                }
                if p.attempt(|p| p.cur.literal("\\")).is_ok() {
                    body.push('\\');
                    body.push(p.cur.any_char()?);
                    continue;
                }
                match p.attempt(|p| p.cur.char_not("/", |c| c == '/' || c == '\n')) {
                    Ok(c) => body.push(c),
                    Err(_) => break,
                }
            }
            p.cur.literal("/")?;
            if body.is_empty() {
                return p.expecting("regular expression");
            }
            Ok(body)
        })
    }

    // ------------------------------------------------------------------
    // Combined scalar literal
    // ------------------------------------------------------------------

    /// Ordered choice over every scalar literal form. Longest-signature
    /// forms come first so prefixes do not shadow them (timestamps before
    /// addresses before durations before plain numbers).
    pub(crate) fn scalar_literal(&mut self) -> PResult<Primitive> {
        if let Ok(text) = self.string_literal() {
            return Ok(Primitive {
                typ: "string".to_string(),
                text,
            });
        }
        if let Ok(prim) = self.timestamp() {
            return Ok(prim);
        }
        if let Ok(prim) = self.ip_or_net() {
            return Ok(prim);
        }
        if let Ok(prim) = self.duration() {
            return Ok(prim);
        }
        if let Ok(prim) = self.bytes_literal() {
            return Ok(prim);
        }
        if let Ok(prim) = self.number() {
            return Ok(prim);
        }
        if self.kw("true").is_ok() {
            return Ok(Primitive::new("bool", "true"));
        }
        if self.kw("false").is_ok() {
            return Ok(Primitive::new("bool", "false"));
        }
        if self.kw("null").is_ok() {
            return Ok(Primitive::new("null", "null"));
        }
        self.expecting("literal")
    }
}

/// `(":" group)*` after the first head group, stopping before a `::`.
fn many_head_groups(p: &mut Parser<'_>) {
    while p
        .attempt(|p| {
            p.cur.literal(":")?;
            p.not_ahead(|p| p.cur.literal(":"))?;
            p.hex_group()
        })
        .is_ok()
    {}
}
