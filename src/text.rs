use crate::error::ParseError;
use crate::resource;
use crate::ulimit::Ulimit;
use crate::ulimits::Ulimits;
use log::trace;

/// Parses a single `name=soft[:hard]` token.
///
/// # Examples
///
/// ```
/// use ulimit_flags::{text, Ulimit};
/// let (name, ulimit) = text::parse_ulimit("nofile=1024:2048").unwrap();
/// assert_eq!(name, "nofile");
/// assert_eq!(ulimit, Ulimit::new(1024, 2048));
/// ```
pub fn parse_ulimit(token: &str) -> Result<(String, Ulimit), ParseError> {
    let (name, value) = match token.split_once('=') {
        Some(parts) => parts,
        None => return Err(ParseError::InvalidArgument(token.to_string())),
    };

    if !resource::is_known(name) {
        return Err(ParseError::UnknownResource(name.to_string()));
    }

    let parts: Vec<&str> = value.split(':').collect();
    let ulimit = match parts.as_slice() {
        [soft] => Ulimit::single(parse_limit(soft)?),
        [soft, hard] => {
            let hard = parse_limit(hard)?;
            Ulimit::new(parse_limit(soft)?, hard)
        }
        _ => return Err(ParseError::TooManyValues(value.to_string())),
    };
    trace!("Parsed ulimit {} as {:?}", name, ulimit);

    Ok((name.to_string(), ulimit))
}

/// Parses a batch of flag tokens, the last token for a name wins.
///
/// The first malformed token aborts the whole batch.
pub fn parse_ulimits<I, S>(tokens: I) -> Result<Ulimits, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ulimits = Ulimits::new();
    for token in tokens {
        let (name, ulimit) = parse_ulimit(token.as_ref())?;
        ulimits.insert(name, ulimit);
    }
    Ok(ulimits)
}

/// Renders the collection the way the runtime option displays itself.
pub fn render(ulimits: &Ulimits) -> String {
    ulimits.to_ulimit_opt().to_string()
}

pub(crate) fn parse_limit(value: &str) -> Result<i64, ParseError> {
    value
        .parse::<i64>()
        .map_err(|source| ParseError::InvalidValue {
            value: value.to_string(),
            source,
        })
}
