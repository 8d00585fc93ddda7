//! UnitDeck MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio. Logs go to stderr.
//!
//! Tools:
//! - list_categories: Home-screen categories
//! - list_units: Units of one domain, in display order
//! - convert: Convert a value within a domain
//! - convert_currency: Convert with the latest exchange rates
//! - search_currencies: Find currencies by code or name

use std::io;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use unitdeck::{ConversionError, RateConfig, UnitDeck, DOMAINS};

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "unitdeck";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const INVALID_PARAMS: i32 = -32602;
const METHOD_NOT_FOUND: i32 = -32601;
const PARSE_ERROR: i32 = -32700;

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: INVALID_PARAMS, message: message.into(), data: None }
    }
}

impl From<ConversionError> for McpError {
    fn from(e: ConversionError) -> Self {
        let mut data = json!({ "code": e.code() });
        if let ConversionError::UnknownDomain(_) = e {
            data["available"] = json!(DOMAINS.ids());
        }
        McpError { code: INVALID_PARAMS, message: e.to_string(), data: Some(data) }
    }
}

impl McpResponse {
    fn new(id: Option<JsonValue>, result: Result<JsonValue, McpError>) -> Self {
        match result {
            Ok(r) => McpResponse { jsonrpc: "2.0".to_string(), id, result: Some(r), error: None },
            Err(e) => McpResponse { jsonrpc: "2.0".to_string(), id, result: None, error: Some(e) },
        }
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let config = RateConfig::from_env();
    let deck = UnitDeck::from_config(&config);

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "UnitDeck MCP server started");
    info!(domains = DOMAINS.all().len(), currency = deck.is_refreshing(), "Server ready, waiting for requests");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(bytes = line.len(), "received request");

        let Some(response) = handle_line(&deck, line) else {
            continue;
        };

        if let Err(e) = write_response(&mut stdout, &response).await {
            error!(error = %e, "error writing response");
            break;
        }
    }

    info!("Client disconnected, shutting down");
    Ok(())
}

async fn write_response(stdout: &mut tokio::io::Stdout, response: &McpResponse) -> io::Result<()> {
    let mut json = serde_json::to_string(response).map_err(io::Error::other)?;
    json.push('\n');
    stdout.write_all(json.as_bytes()).await?;
    stdout.flush().await
}

/// Handle one input line. Notifications (no id) get no response.
fn handle_line(deck: &UnitDeck, line: &str) -> Option<McpResponse> {
    let request: McpRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "error parsing request");
            return Some(McpResponse::new(None, Err(McpError {
                code: PARSE_ERROR,
                message: format!("Parse error: {}", e),
                data: None,
            })));
        }
    };

    let response = handle_request(deck, &request);

    if request.id.is_none() {
        debug!(method = %request.method, "notification processed");
        return None;
    }
    debug!(method = %request.method, "sending response");
    Some(response)
}

fn handle_request(deck: &UnitDeck, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(deck, &request.params),

        _ => Err(McpError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    McpResponse::new(request.id.clone(), result)
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Echo the client's protocol version
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit and currency converter"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "UnitDeck converts values between units of one category (distance, pressure, temperature, ...) and between currencies. Use 'list_categories' and 'list_units' to discover exact unit names before calling 'convert'."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "list_categories",
                "description": "List converter categories in home-screen order.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List the units of one category in display order, with its default pair.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "domain": {
                            "type": "string",
                            "description": "Category id or name, e.g. 'distance' or 'Fuel Mileage'"
                        }
                    },
                    "required": ["domain"]
                }
            },
            {
                "name": "convert",
                "description": "Convert a value between two units of one category. Result is null when the value is not a number.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "domain": { "type": "string", "description": "Category id or name" },
                        "value": { "type": ["string", "number"], "description": "Value as typed on the keypad" },
                        "from": { "type": "string", "description": "Source unit (default: category default)" },
                        "to": { "type": "string", "description": "Target unit (default: category default)" }
                    },
                    "required": ["domain", "value"]
                }
            },
            {
                "name": "convert_currency",
                "description": "Convert between currencies with the latest exchange rates. Result is null when no rates are available for the pair.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": { "type": ["string", "number"] },
                        "from": { "type": "string", "description": "ISO 4217 code (default: USD)" },
                        "to": { "type": "string", "description": "ISO 4217 code (default: EUR)" }
                    },
                    "required": ["value"]
                }
            },
            {
                "name": "search_currencies",
                "description": "Find currencies whose code or name contains the query (case-insensitive).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string" }
                    },
                    "required": ["query"]
                }
            }
        ]
    }))
}

fn handle_tool_call(deck: &UnitDeck, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    debug!(tool = name, "tool call");

    match name {
        "list_categories" => tool_list_categories(deck),
        "list_units" => tool_list_units(deck, &args),
        "convert" => tool_convert(deck, &args),
        "convert_currency" => tool_convert_currency(deck, &args),
        "search_currencies" => tool_search_currencies(deck, &args),
        _ => Err(McpError {
            code: INVALID_PARAMS,
            message: format!("Unknown tool: {}", name),
            data: None,
        }),
    }
}

fn tool_result(text: String, data: JsonValue) -> Result<JsonValue, McpError> {
    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "data": data,
        "isError": false
    }))
}

fn required_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, McpError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {}", key)))
}

fn optional_str<'a>(args: &'a JsonValue, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}

/// Values may arrive as strings (keypad text) or JSON numbers
fn value_arg(args: &JsonValue) -> Result<String, McpError> {
    match args.get("value") {
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        _ => Err(McpError::invalid_params("Missing value")),
    }
}

fn tool_list_categories(deck: &UnitDeck) -> Result<JsonValue, McpError> {
    let categories = deck.categories();
    let text = categories.iter()
        .map(|c| if c.is_available() { c.name.to_string() } else { format!("{} (unavailable)", c.name) })
        .collect::<Vec<_>>()
        .join("\n");
    tool_result(text, json!(categories))
}

fn tool_list_units(deck: &UnitDeck, args: &JsonValue) -> Result<JsonValue, McpError> {
    let domain = deck.domain(required_str(args, "domain")?)?;
    let units = domain.unit_names();
    tool_result(
        format!("{}: {}", domain.title, units.join(", ")),
        json!({
            "domain": domain.id,
            "title": domain.title,
            "units": units,
            "base_unit": domain.base_unit,
            "default_from": domain.default_from,
            "default_to": domain.default_to,
            "precision": domain.precision,
        }),
    )
}

fn tool_convert(deck: &UnitDeck, args: &JsonValue) -> Result<JsonValue, McpError> {
    let domain = required_str(args, "domain")?;
    let value = value_arg(args)?;
    let conversion = deck.convert(domain, &value, optional_str(args, "from"), optional_str(args, "to"))?;

    let text = match &conversion.result {
        Some(r) => format!("{} {} = {} {}", conversion.value, conversion.from, r, conversion.to),
        None => format!("No result for '{}'", conversion.value),
    };
    tool_result(text, json!(conversion))
}

fn tool_convert_currency(deck: &UnitDeck, args: &JsonValue) -> Result<JsonValue, McpError> {
    let value = value_arg(args)?;
    let conversion = deck.convert_currency(&value, optional_str(args, "from"), optional_str(args, "to"));

    let text = match (&conversion.result, &conversion.as_of) {
        (Some(r), Some(as_of)) => format!(
            "{} {} = {} {} (rates as of {})",
            conversion.value, conversion.from, r, conversion.to, as_of.to_rfc3339()
        ),
        (_, None) => "No exchange rates available".to_string(),
        (None, Some(_)) => format!("No rate for {} -> {}", conversion.from, conversion.to),
    };
    tool_result(text, json!(conversion))
}

fn tool_search_currencies(deck: &UnitDeck, args: &JsonValue) -> Result<JsonValue, McpError> {
    let query = args.get("query").and_then(|v| v.as_str()).unwrap_or("");
    let hits = deck.search_currencies(query);
    let text = hits.iter().map(|c| c.label()).collect::<Vec<_>>().join("\n");
    tool_result(text, json!(hits))
}
