//! Glob-to-regex translation.
//!
//! The grammar treats bare search words containing `*` or `?` as glob
//! patterns; [`reglob`] rewrites such a pattern into anchored regex source
//! text (the parser never compiles it), and [`is_globby`] is the predicate
//! that decides whether a word is a pattern at all.

/// Options for [`reglob`]. The grammar's own call sites use the default:
/// extended syntax on, globstar off, no flags.
#[derive(Debug, Clone)]
pub struct GlobOptions {
    /// Enables `?` as single-character wildcard and `{a,b}` alternation.
    pub extended: bool,
    /// Makes `**` span path segments while `*` stays within one segment.
    pub globstar: bool,
    /// Regex flags; if they contain `g` the output is left unanchored.
    pub flags: String,
}

impl Default for GlobOptions {
    fn default() -> Self {
        GlobOptions {
            extended: true,
            globstar: false,
            flags: String::new(),
        }
    }
}

/// True if `s` contains glob metacharacters.
pub fn is_globby(s: &str) -> bool {
    s.contains('*') || s.contains('?')
}

/// Translates a glob into regex source text.
///
/// Regex metacharacters are escaped; `?` becomes `.` in extended mode;
/// `{`/`}` open and close an alternation group in extended mode, with `,`
/// inside the group becoming `|`. Runs of `*` collapse to `.*` unless
/// globstar is enabled, in which case a multi-star run bounded by `/` (or the
/// string ends) becomes the path-spanning group `((?:[^/]*(?:/|$))*)` and any
/// other run becomes the single-segment group `([^/]*)`. The result is
/// wrapped in `^...$` unless the flags contain `g`.
pub fn reglob(glob: &str, opts: &GlobOptions) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::new();
    let mut in_group = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '/' | '$' | '^' | '+' | '.' | '(' | ')' | '=' | '!' | '|' => {
                out.push('\\');
                out.push(c);
            }
            '?' => {
                if opts.extended {
                    out.push('.');
                } else {
                    out.push_str("\\?");
                }
            }
            '[' | ']' => {
                if opts.extended {
                    out.push(c);
                } else {
                    out.push('\\');
                    out.push(c);
                }
            }
            '{' => {
                if opts.extended {
                    in_group = true;
                    out.push('(');
                } else {
                    out.push_str("\\{");
                }
            }
            '}' => {
                if opts.extended {
                    in_group = false;
                    out.push(')');
                } else {
                    out.push_str("\\}");
                }
            }
            ',' => {
                if in_group {
                    out.push('|');
                } else {
                    out.push_str("\\,");
                }
            }
            '*' => {
                let prev = if i == 0 { None } else { Some(chars[i - 1]) };
                let mut star_count = 1;
                while i + 1 < chars.len() && chars[i + 1] == '*' {
                    star_count += 1;
                    i += 1;
                }
                let next = chars.get(i + 1).copied();

                if !opts.globstar {
                    // A run of any length is equivalent to a single star.
                    out.push_str(".*");
                } else {
                    let spans_segments = star_count > 1
                        && matches!(prev, None | Some('/'))
                        && matches!(next, None | Some('/'));
                    if spans_segments {
                        out.push_str("((?:[^/]*(?:/|$))*)");
                        // The group already matches the trailing separator.
                        i += 1;
                    } else {
                        out.push_str("([^/]*)");
                    }
                }
            }
            _ => out.push(c),
        }
        i += 1;
    }

    if opts.flags.contains('g') {
        out
    } else {
        format!("^{}$", out)
    }
}
