//! JSON-RPC request handling

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};
use quantity_core::QuantityError;
use quantity_formatter::{OverrideFormatEntry, QuantityFormatter, QuantityType};

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const ENGINE_ERROR: i32 = -32000;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl RpcError {
    fn invalid_params(message: impl Into<String>) -> Self {
        RpcError {
            code: INVALID_PARAMS,
            message: message.into(),
            data: None,
        }
    }
}

impl From<QuantityError> for RpcError {
    fn from(err: QuantityError) -> Self {
        RpcError {
            code: ENGINE_ERROR,
            message: err.to_string(),
            data: Some(json!({ "code": err.code(), "suggestion": err.suggestion() })),
        }
    }
}

impl RpcResponse {
    fn new(id: Option<JsonValue>, result: Result<JsonValue, RpcError>) -> Self {
        match result {
            Ok(r) => RpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(r),
                error: None,
            },
            Err(e) => RpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: None,
                error: Some(e),
            },
        }
    }

    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                "{{\"jsonrpc\":\"2.0\",\"id\":null,\"error\":{{\"code\":-32603,\"message\":\"{}\"}}}}",
                e.to_string().replace('"', "'")
            )
        })
    }
}

/// Handle one input line; notifications produce no reply
pub async fn handle_line(formatter: &QuantityFormatter, line: &str) -> Option<String> {
    let request: RpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "unparseable request");
            let error = RpcError {
                code: PARSE_ERROR,
                message: format!("Parse error: {}", e),
                data: None,
            };
            return Some(RpcResponse::new(None, Err(error)).to_line());
        }
    };

    debug!(method = %request.method, "processing request");
    let response = handle_request(formatter, &request).await;
    if request.id.is_none() {
        debug!(method = %request.method, "notification processed");
        return None;
    }
    Some(response.to_line())
}

pub async fn handle_request(formatter: &QuantityFormatter, request: &RpcRequest) -> RpcResponse {
    let params = request.params.clone().unwrap_or_else(|| json!({}));
    let result = match request.method.as_str() {
        "ping" => Ok(json!({})),
        "loadFormatAndParsingMaps" => load_maps(formatter, &params).await,
        "formatQuantity" => format_quantity(formatter, &params).await,
        "parseIntoQuantityValue" => parse_quantity(formatter, &params).await,
        "setOverrideFormats" => set_overrides(formatter, &params).await,
        "getOverrideFormats" => get_overrides(formatter, &params),
        "clearOverrideFormats" => clear_overrides(formatter, &params),
        "clearAllOverrideFormats" => {
            formatter.clear_all_override_formats();
            Ok(json!({}))
        }
        "findUnitByName" => find_unit(formatter, &params).await,
        _ => Err(RpcError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };
    RpcResponse::new(request.id.clone(), result)
}

fn str_param<'a>(params: &'a JsonValue, name: &str) -> Result<&'a str, RpcError> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params(format!("Missing {} argument", name)))
}

fn quantity_type(params: &JsonValue) -> Result<QuantityType, RpcError> {
    str_param(params, "quantityType").map(QuantityType::from)
}

/// Explicit `useImperial`, else the formatter's active system
fn use_imperial(formatter: &QuantityFormatter, params: &JsonValue) -> bool {
    params
        .get("useImperial")
        .and_then(|v| v.as_bool())
        .unwrap_or_else(|| formatter.use_imperial_formats())
}

async fn load_maps(formatter: &QuantityFormatter, params: &JsonValue) -> Result<JsonValue, RpcError> {
    let imperial = use_imperial(formatter, params);
    formatter.load_format_and_parsing_maps(imperial).await?;
    Ok(json!({ "useImperial": imperial }))
}

async fn format_quantity(formatter: &QuantityFormatter, params: &JsonValue) -> Result<JsonValue, RpcError> {
    let quantity_type = quantity_type(params)?;
    let magnitude = params
        .get("magnitude")
        .and_then(|v| v.as_f64())
        .ok_or_else(|| RpcError::invalid_params("Missing magnitude argument"))?;
    let spec = formatter
        .get_formatter_spec_by_quantity_type(&quantity_type, use_imperial(formatter, params))
        .await?;
    Ok(json!({ "formatted": formatter.format_quantity(magnitude, &spec) }))
}

async fn parse_quantity(formatter: &QuantityFormatter, params: &JsonValue) -> Result<JsonValue, RpcError> {
    let quantity_type = quantity_type(params)?;
    let text = str_param(params, "text")?;
    let spec = formatter
        .get_parser_spec_by_quantity_type(&quantity_type, use_imperial(formatter, params))
        .await?;
    let result = formatter.parse_into_quantity_value(text, &spec);
    serde_json::to_value(result).map_err(|e| QuantityError::from(e).into())
}

async fn set_overrides(formatter: &QuantityFormatter, params: &JsonValue) -> Result<JsonValue, RpcError> {
    let quantity_type = quantity_type(params)?;
    let overrides = params
        .get("overrides")
        .cloned()
        .ok_or_else(|| RpcError::invalid_params("Missing overrides argument"))?;
    let entry: OverrideFormatEntry = serde_json::from_value(overrides)
        .map_err(|e| QuantityError::invalid_format(e.to_string()))?;
    formatter.set_override_formats(&quantity_type, entry).await?;
    Ok(json!({}))
}

fn get_overrides(formatter: &QuantityFormatter, params: &JsonValue) -> Result<JsonValue, RpcError> {
    let quantity_type = quantity_type(params)?;
    let entry = formatter.get_override_formats(&quantity_type);
    serde_json::to_value(entry).map_err(|e| QuantityError::from(e).into())
}

fn clear_overrides(formatter: &QuantityFormatter, params: &JsonValue) -> Result<JsonValue, RpcError> {
    let quantity_type = quantity_type(params)?;
    formatter.clear_override_formats(&quantity_type);
    Ok(json!({}))
}

async fn find_unit(formatter: &QuantityFormatter, params: &JsonValue) -> Result<JsonValue, RpcError> {
    let name = str_param(params, "name")?;
    let unit = formatter.find_unit_by_name(name).await?;
    serde_json::to_value(unit).map_err(|e| QuantityError::from(e).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn call(formatter: &QuantityFormatter, request: JsonValue) -> JsonValue {
        let line = handle_line(formatter, &request.to_string()).await.unwrap();
        serde_json::from_str(&line).unwrap()
    }

    #[tokio::test]
    async fn test_format_and_parse() {
        let formatter = QuantityFormatter::with_basic_units();
        let response = call(&formatter, json!({
            "jsonrpc": "2.0", "id": 1, "method": "formatQuantity",
            "params": { "quantityType": "Length", "magnitude": 1.5, "useImperial": true }
        }))
        .await;
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["formatted"], "4'-11\"");

        let response = call(&formatter, json!({
            "jsonrpc": "2.0", "id": 2, "method": "parseIntoQuantityValue",
            "params": { "quantityType": "Length", "text": "48 in" }
        }))
        .await;
        assert_eq!(response["result"]["status"], "success");
        let value = response["result"]["value"].as_f64().unwrap();
        assert!((value - 1.2192).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_override_roundtrip() {
        let formatter = QuantityFormatter::with_basic_units();
        let response = call(&formatter, json!({
            "jsonrpc": "2.0", "id": 1, "method": "setOverrideFormats",
            "params": {
                "quantityType": "Length",
                "overrides": { "metric": {
                    "type": "Decimal", "precision": 4,
                    "formatTraits": ["keepSingleZero", "showUnitLabel"],
                    "composite": { "units": [{ "name": "Units.CM", "label": "cm" }] }
                } }
            }
        }))
        .await;
        assert!(response.get("error").is_none(), "{}", response);

        let response = call(&formatter, json!({
            "jsonrpc": "2.0", "id": 2, "method": "formatQuantity",
            "params": { "quantityType": "Length", "magnitude": 1.5, "useImperial": false }
        }))
        .await;
        assert_eq!(response["result"]["formatted"], "150 cm");
    }

    #[tokio::test]
    async fn test_errors() {
        let formatter = QuantityFormatter::with_basic_units();
        let response = call(&formatter, json!({
            "jsonrpc": "2.0", "id": 1, "method": "formatQuantity",
            "params": { "quantityType": "Nope", "magnitude": 1.0 }
        }))
        .await;
        assert_eq!(response["error"]["code"], ENGINE_ERROR);
        assert_eq!(response["error"]["data"]["code"], "UNKNOWN_QUANTITY_TYPE");

        let response = call(&formatter, json!({ "jsonrpc": "2.0", "id": 2, "method": "bogus" })).await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);

        let response = call(&formatter, json!({
            "jsonrpc": "2.0", "id": 3, "method": "findUnitByName", "params": {}
        }))
        .await;
        assert_eq!(response["error"]["code"], INVALID_PARAMS);

        let line = handle_line(&formatter, "{not json").await.unwrap();
        assert!(line.contains("-32700"));
    }

    #[tokio::test]
    async fn test_notification_has_no_reply() {
        let formatter = QuantityFormatter::with_basic_units();
        let line = json!({ "jsonrpc": "2.0", "method": "clearAllOverrideFormats" }).to_string();
        assert!(handle_line(&formatter, &line).await.is_none());
    }

    #[tokio::test]
    async fn test_find_unit() {
        let formatter = QuantityFormatter::with_basic_units();
        let response = call(&formatter, json!({
            "jsonrpc": "2.0", "id": 1, "method": "findUnitByName", "params": { "name": "Units.SURVEY_FT" }
        }))
        .await;
        assert_eq!(response["result"]["label"], "ft (US Survey)");
        assert_eq!(response["result"]["phenomenon"], "length");
    }
}
