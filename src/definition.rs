use serde::Serialize;
use serde_json::{Value, json};

pub const TOOL_ID: &str = "shinkai-tool-duckduckgo-search";

/// Static description of the tool for registries that list it.
#[derive(Serialize, Debug, Clone)]
pub struct ToolDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub keywords: Vec<&'static str>,
    pub configurations: Value,
    pub parameters: Value,
    pub result: Value,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        id: TOOL_ID,
        name: "Shinkai: DuckDuckGo Search",
        description: concat!(
            "Searches the DuckDuckGo search engine. Example result: ",
            r#"[{"title": "IMDb Top 250 Movies", "description": "Find out which <b>movies</b> are rated as the <b>best</b> <b>of</b> <b>all</b> <b>time</b> by IMDb users.", "url": "https://www.imdb.com/chart/top/"}]"#,
        ),
        author: "Shinkai",
        keywords: vec!["duckduckgo", "search", "shinkai"],
        configurations: json!({
            "type": "object",
            "properties": {},
            "required": [],
        }),
        parameters: string_object_schema("message"),
        result: string_object_schema("message"),
    }
}

fn string_object_schema(field: &str) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(field.to_string(), json!({ "type": "string" }));
    json!({
        "type": "object",
        "properties": properties,
        "required": [field],
    })
}

#[test]
fn test_definition_shape() {
    let def = serde_json::to_value(definition()).unwrap();
    assert_eq!(def["id"], TOOL_ID);
    assert_eq!(def["keywords"], json!(["duckduckgo", "search", "shinkai"]));
    assert_eq!(def["configurations"]["properties"], json!({}));
    assert_eq!(def["parameters"]["required"], json!(["message"]));
    assert_eq!(def["parameters"]["properties"]["message"]["type"], "string");
    assert_eq!(def["result"], def["parameters"]);
}
