use crate::table;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use vista_router::{PathData, PathType, Router, Value};

/// Arguments of `vista build`
pub struct BuildRequest {
    pub view: Option<String>,
    pub qualifier: Option<String>,
    pub fields: Vec<(String, String)>,
    pub vars: Vec<(String, String)>,
    pub path_type: PathType,
}

/// Reads a command line value as number or boolean where possible
///
/// Only values that print back unchanged become numbers, so `007` stays a string.
fn parse_value(raw: &str) -> Value {
    if let Ok(number) = raw.parse::<i64>() {
        if number.to_string() == raw {
            return Value::from(number);
        }
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::from(raw),
    }
}

fn path_data(request: &BuildRequest) -> PathData {
    let data = request
        .fields
        .iter()
        .fold(PathData::new(), |data, (k, v)| data.with_field(k, parse_value(v)));
    let data = request
        .vars
        .iter()
        .fold(data, |data, (k, v)| data.with_variable(k, parse_value(v)));

    match &request.qualifier {
        Some(q) => data.with_qualifier(q),
        None => data,
    }
}

pub fn execute(config_path: &Path, request: BuildRequest) -> Result<()> {
    let (config, table) = table::load(config_path)?;
    let router = Router::new(table);
    let data = path_data(&request);

    let link = router.build_link(
        &data,
        request.view.as_deref(),
        request.qualifier.as_deref(),
        request.path_type,
        &config.path_base(),
    )?;

    match link {
        Some(link) => println!("{}", link),
        None => println!("{}", "No view can render these values".yellow()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_router::{PathContext, Signature};

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("12"), Value::Int(12));
        assert_eq!(parse_value("-4"), Value::Int(-4));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("12a"), Value::String("12a".to_string()));
    }

    #[test]
    fn test_parse_value_keeps_leading_zeros() {
        assert_eq!(parse_value("007"), Value::String("007".to_string()));
        assert_eq!(parse_value("+5"), Value::String("+5".to_string()));
        assert_eq!(parse_value("007").render(), Some("007".to_string()));
    }

    #[test]
    fn test_path_data_signature() {
        let request = BuildRequest {
            view: None,
            qualifier: Some("rss".to_string()),
            fields: vec![("id".to_string(), "3".to_string())],
            vars: vec![("type".to_string(), "thumb".to_string())],
            path_type: PathType::View,
        };
        let data = path_data(&request);
        assert_eq!(data.signature(), Signature::new(["id", "#type"]));
        assert_eq!(data.qualifier(), Some("rss"));
    }
}
