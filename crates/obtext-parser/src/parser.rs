//! Recursive descent parser for objective text.
//!
//! The grammar is small:
//!
//! ```text
//! object  := '@' name arg*
//! name    := [A-Za-z0-9_]+
//! arg     := ws* '{' element* '}'
//! element := object | text
//! text    := ( '\' [@}] | [^@}] )+
//! ```
//!
//! A `{` inside text is ordinary text. A backslash only protects the next
//! character from ending the text run; escapes are resolved later by
//! [`normalize`](crate::normalize). The public entry point is
//! [`build_document`], which produces the borrowed [`RawObject`] tree.

use log::trace;
use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{alt, cut_err, fail, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location},
    token::{none_of, one_of, take_while},
};

use obtext_core::syntax::is_name_char;

use crate::{
    error::{Diagnostic, ErrorCode},
    limits::Limits,
    normalize::is_whitespace,
    parser_types::{RawArg, RawElement, RawObject},
    span::Span,
};

/// Rich diagnostic information for syntax errors.
///
/// Attached to winnow errors via `.context()`. The innermost context wins,
/// so a failure deep inside nested arguments is reported where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SyntaxDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<SyntaxDiagnostic>>;

/// Parse an object name: one or more ASCII letters, digits or underscores.
fn object_name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., is_name_char).parse_next(input)
}

/// Parse a maximal run of text, escapes left in place.
fn text<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    repeat::<_, _, (), _, _>(
        1..,
        alt((('\\', one_of(['@', '}'])).void(), none_of(['@', '}']).void())),
    )
    .take()
    .parse_next(input)
}

/// Parse a single element of an argument: a nested object or a text run.
fn element<'a>(input: &mut Input<'a>, depth: usize, limits: &Limits) -> IResult<RawElement<'a>> {
    alt((
        (|input: &mut Input<'a>| object(input, depth + 1, limits)).map(RawElement::Object),
        text.map(RawElement::Text),
    ))
    .parse_next(input)
}

/// Parse one `{...}` argument, including the whitespace before it.
///
/// Backtracks if no `{` follows. Once the brace is consumed the argument
/// must be closed, so any failure inside it is fatal.
fn argument<'a>(input: &mut Input<'a>, depth: usize, limits: &Limits) -> IResult<RawArg<'a>> {
    multispace0.parse_next(input)?;
    let start = input.current_token_start();
    '{'.parse_next(input)?;

    let elements: Vec<RawElement<'a>> = cut_err(terminated(
        repeat(0.., |input: &mut Input<'a>| element(input, depth, limits)),
        '}',
    ))
    .context(SyntaxDiagnostic {
        code: ErrorCode::E003,
        message: "unterminated argument",
        help: Some("close the argument with `}`, or write `\\}` for a literal brace"),
        start,
    })
    .parse_next(input)?;

    Ok(RawArg { elements })
}

/// Parse `@name` followed by any number of arguments.
///
/// `depth` is the nesting depth of this object; the root has depth 1.
fn object<'a>(input: &mut Input<'a>, depth: usize, limits: &Limits) -> IResult<RawObject<'a>> {
    let start = input.current_token_start();
    '@'.parse_next(input)?;

    if limits.exceeds(depth) {
        return cut_err(fail)
            .context(SyntaxDiagnostic {
                code: ErrorCode::E006,
                message: "objects are nested too deeply",
                help: Some("raise `max_depth` in the `[parser]` configuration section"),
                start,
            })
            .parse_next(input);
    }

    let name = cut_err(object_name)
        .context(SyntaxDiagnostic {
            code: ErrorCode::E002,
            message: "expected an object name after `@`",
            help: Some("names are made of letters, digits and `_`; write `\\@` for a literal `@`"),
            start,
        })
        .parse_next(input)?;

    let args: Vec<RawArg<'a>> =
        repeat(0.., |input: &mut Input<'a>| argument(input, depth, limits)).parse_next(input)?;

    let end = input.current_token_start();
    Ok(RawObject {
        name,
        span: Span::new(start..end),
        args,
    })
}

/// Parse the root object of a document.
fn document<'a>(input: &mut Input<'a>, limits: &Limits) -> IResult<RawObject<'a>> {
    let start = input.current_token_start();
    (|input: &mut Input<'a>| object(input, 1, limits))
        .context(SyntaxDiagnostic {
            code: ErrorCode::E001,
            message: "expected a root object",
            help: Some("a document is a single object such as `@doc{...}`"),
            start,
        })
        .parse_next(input)
}

/// Convert a winnow error into a [`Diagnostic`].
///
/// `error_pos` and `len` are relative to the trimmed input; `offset` is the
/// number of bytes trimmed from its start.
fn convert_error(
    err: ErrMode<ContextError<SyntaxDiagnostic>>,
    error_pos: usize,
    offset: usize,
    len: usize,
) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(SyntaxDiagnostic {
        code,
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        // Point at least one character when there is one to point at.
        let end = error_pos.max(*start + 1).min(len.max(*start));
        let span = Span::new(*start..end).offset(offset);

        let mut diag = Diagnostic::error(*message)
            .with_code(*code)
            .with_label(span, code.description());
        if let Some(h) = help {
            diag = diag.with_help(*h);
        }
        return diag;
    }

    // Fallback when no context is present
    let span = Span::new(error_pos..error_pos.saturating_add(1).min(len)).offset(offset);
    Diagnostic::error("invalid syntax")
        .with_code(ErrorCode::E001)
        .with_label(span, ErrorCode::E001.description())
}

/// Parse `source` into a raw syntax tree.
///
/// Leading and trailing whitespace is ignored. The root object must consume
/// the rest of the input. Spans in the returned tree and in diagnostics are
/// byte offsets into `source` itself.
pub fn build_document<'a>(source: &'a str, limits: &Limits) -> Result<RawObject<'a>, Diagnostic> {
    let trimmed = source.trim_start_matches(is_whitespace);
    let offset = source.len() - trimmed.len();
    let trimmed = trimmed.trim_end_matches(is_whitespace);

    let mut input = LocatingSlice::new(trimmed);
    let mut root = match document(&mut input, limits) {
        Ok(root) => root,
        Err(err) => {
            let error_pos = input.current_token_start();
            return Err(convert_error(err, error_pos, offset, trimmed.len()));
        }
    };

    let consumed = input.current_token_start();
    if consumed < trimmed.len() {
        let span = Span::new(consumed..trimmed.len()).offset(offset);
        return Err(Diagnostic::error("remaining characters after the root object")
            .with_code(ErrorCode::E004)
            .with_label(span, "not part of the document")
            .with_help("a document is exactly one object; wrap several objects in a parent"));
    }

    shift_spans(&mut root, offset);
    trace!(name = root.name, consumed; "Parsed root object");
    Ok(root)
}

/// Shift every object span by `offset` bytes.
fn shift_spans(object: &mut RawObject<'_>, offset: usize) {
    if offset == 0 {
        return;
    }
    object.span = object.span.offset(offset);
    for arg in &mut object.args {
        for element in &mut arg.elements {
            if let RawElement::Object(child) = element {
                shift_spans(child, offset);
            }
        }
    }
}
