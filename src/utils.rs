/// Provides a representation of the whole chain of errors that led to a failure, not just the
/// outermost one. Meant to be used by `Debug` implementations on error enums, so that log records
/// carry the full causal chain.
pub(crate) fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
