use homecalc_core::{HomeCalcError, HomeCalcResult};
use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read a typed input piped on stdin, as JSON or, failing that, YAML.
/// Returns None when stdin is a terminal or carries nothing.
pub fn read_stdin<T: DeserializeOwned>() -> HomeCalcResult<Option<T>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(buffer: &str) -> HomeCalcResult<Option<T>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(Some(value)),
        Err(json_err) => serde_yaml::from_str(trimmed).map(Some).map_err(|_| {
            HomeCalcError::Serialization(format!(
                "stdin is neither valid JSON nor YAML: {json_err}"
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homecalc_core::mortgage::land_transfer_tax::{LandTransferTaxInput, LttJurisdiction};
    use rust_decimal_macros::dec;

    #[test]
    fn test_blank_stdin_is_none() {
        let parsed: Option<LandTransferTaxInput> = parse_piped("  \n").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_json_then_yaml() {
        let json: Option<LandTransferTaxInput> =
            parse_piped(r#"{"value": "600000", "jurisdiction": "toronto"}"#).unwrap();
        assert_eq!(json.unwrap().jurisdiction, LttJurisdiction::OntarioPlusToronto);

        let yaml: Option<LandTransferTaxInput> = parse_piped("value: 600000\n").unwrap();
        assert_eq!(yaml.unwrap().value, dec!(600000));
    }

    #[test]
    fn test_garbage_is_an_error() {
        let parsed: HomeCalcResult<Option<LandTransferTaxInput>> = parse_piped("{not: [valid");
        assert!(matches!(parsed, Err(HomeCalcError::Serialization(_))));
    }
}
