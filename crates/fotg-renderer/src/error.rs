//! Error types for preview rendering.

use miette::Diagnostic;

/// Errors from the synchronous part of the render pipeline.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum RenderError {
    /// Syntect failed while highlighting or generating theme CSS
    #[error(transparent)]
    #[diagnostic(code(fotg::render::highlight))]
    Highlight(#[from] syntect::Error),

    /// A syntect theme named in the configuration is not bundled
    #[error("unknown syntax theme: {0}")]
    #[diagnostic(
        code(fotg::render::syntax_theme),
        help("bundled themes include `InspiredGitHub` and `base16-ocean.dark`")
    )]
    UnknownSyntaxTheme(String),

    /// A colour theme name that is neither `light` nor `dark`
    #[error("unknown colour theme: {0}")]
    #[diagnostic(code(fotg::render::theme))]
    UnknownTheme(String),
}

/// Failure to render a single diagram block.
///
/// Always recovered locally by the diagram pass: the block keeps its source
/// and gets an inline annotation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum DiagramError {
    /// No diagram engine is loaded on this platform
    #[error("diagram renderer unavailable")]
    #[diagnostic(code(fotg::diagram::unavailable))]
    Unavailable,

    /// The engine rejected the diagram source
    #[error("diagram syntax error: {0}")]
    #[diagnostic(code(fotg::diagram::syntax))]
    Syntax(String),

    /// The engine returned something that was not an SVG document
    #[error("diagram renderer returned no svg")]
    #[diagnostic(code(fotg::diagram::output))]
    MissingOutput,
}
