use async_trait::async_trait;
use meridian_llm::{normalize, ToolCallRequest, Vendor};
use meridian_tools::{
    register_builtins, tool_definitions, tool_result_messages, Error, Result, Tool,
    ToolDefinition, ToolDispatcher, ToolRegistry, ToolResult,
};
use mockall::mock;
use serde_json::{json, Value};
use std::sync::Arc;

mock! {
    pub Recorder {}

    #[async_trait]
    impl Tool for Recorder {
        fn definition(&self) -> &ToolDefinition;
        async fn execute(&self, input: Value) -> Result<ToolResult>;
    }
}

fn builtin_dispatcher() -> ToolDispatcher {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);
    ToolDispatcher::new(Arc::new(registry))
}

fn decode(content: &str) -> Value {
    serde_json::from_str(content).unwrap()
}

#[tokio::test]
async fn test_calculator_round_trip() {
    let dispatcher = builtin_dispatcher();
    let calls = [ToolCallRequest::new(
        "call_1",
        "calculator",
        r#"{"operation":"add","a":5,"b":3}"#,
    )];

    let outcomes = dispatcher.execute_all(&calls).await;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].tool_call_id, "call_1");
    assert_eq!(
        decode(&outcomes[0].content()),
        json!({
            "success": true,
            "data": {"result": 8, "operation": "add", "a": 5, "b": 3}
        })
    );
}

#[tokio::test]
async fn test_unknown_tool() {
    let dispatcher = builtin_dispatcher();
    let calls = [ToolCallRequest::new("call_x", "nonexistent_tool", "{}")];

    let outcomes = dispatcher.execute_all(&calls).await;

    let content = decode(&outcomes[0].content());
    assert_eq!(content["success"], false);
    assert!(content["error"]
        .as_str()
        .unwrap()
        .contains("Tool 'nonexistent_tool' not found"));
}

#[tokio::test]
async fn test_division_by_zero() {
    let dispatcher = builtin_dispatcher();
    let calls = [ToolCallRequest::new(
        "call_d",
        "calculator",
        r#"{"operation":"divide","a":10,"b":0}"#,
    )];

    let outcomes = dispatcher.execute_all(&calls).await;

    assert!(!outcomes[0].is_success());
    assert_eq!(
        outcomes[0].result.error(),
        Some("Tool execution failed: Division by zero")
    );
}

#[tokio::test]
async fn test_missing_required_parameter() {
    let dispatcher = builtin_dispatcher();
    let calls = [ToolCallRequest::new(
        "call_m",
        "calculator",
        r#"{"operation":"add","a":5}"#,
    )];

    let outcomes = dispatcher.execute_all(&calls).await;

    assert_eq!(
        outcomes[0].result.error(),
        Some("Tool execution failed: Missing required parameter: b")
    );
}

#[tokio::test]
async fn test_malformed_arguments_never_execute() {
    let mut recorder = MockRecorder::new();
    recorder
        .expect_definition()
        .return_const(ToolDefinition::new("recorder", "Records calls"));
    recorder.expect_execute().never();

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(recorder));
    let dispatcher = ToolDispatcher::new(Arc::new(registry));

    let calls = [ToolCallRequest::new("call_bad", "recorder", "{not json")];
    let outcomes = dispatcher.execute_all(&calls).await;

    assert_eq!(outcomes[0].tool_call_id, "call_bad");
    assert_eq!(
        outcomes[0].result.error(),
        Some("Invalid JSON in tool arguments")
    );
}

#[tokio::test]
async fn test_tool_error_is_contained() {
    let mut recorder = MockRecorder::new();
    recorder
        .expect_definition()
        .return_const(ToolDefinition::new("recorder", "Always fails"));
    recorder
        .expect_execute()
        .times(1)
        .returning(|_| Err(Error::Execution("disk on fire".to_string())));

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(recorder));
    let dispatcher = ToolDispatcher::new(Arc::new(registry));

    let outcomes = dispatcher
        .execute_all(&[ToolCallRequest::new("c1", "recorder", "{}")])
        .await;

    assert_eq!(
        outcomes[0].result.error(),
        Some("Tool execution failed: disk on fire")
    );
}

struct PanickingTool {
    definition: ToolDefinition,
}

#[async_trait]
impl Tool for PanickingTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, _input: Value) -> Result<ToolResult> {
        panic!("tool blew up")
    }
}

#[tokio::test]
async fn test_tool_panic_fails_only_its_call() {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);
    registry.register(Arc::new(PanickingTool {
        definition: ToolDefinition::new("unstable", "Panics on every call"),
    }));
    let dispatcher = ToolDispatcher::new(Arc::new(registry));

    let calls = [
        ToolCallRequest::new("c1", "unstable", "{}"),
        ToolCallRequest::new("c2", "calculator", r#"{"operation":"add","a":1,"b":2}"#),
    ];
    let outcomes = dispatcher.execute_all(&calls).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].tool_call_id, "c1");
    assert_eq!(
        outcomes[0].result.error(),
        Some("Tool execution failed: tool blew up")
    );
    assert!(outcomes[1].is_success());
    assert_eq!(outcomes[1].result.data().unwrap()["result"], 3);
}

#[tokio::test]
async fn test_outcomes_follow_call_order() {
    let dispatcher = builtin_dispatcher();
    let calls = [
        ToolCallRequest::new("a", "calculator", r#"{"operation":"multiply","a":2,"b":3}"#),
        ToolCallRequest::new("b", "nonexistent_tool", "{}"),
        ToolCallRequest::new("c", "current_time", "{}"),
        ToolCallRequest::new("d", "calculator", "oops"),
    ];

    let outcomes = dispatcher.execute_all(&calls).await;

    let ids: Vec<_> = outcomes.iter().map(|o| o.tool_call_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    let successes: Vec<_> = outcomes.iter().map(|o| o.is_success()).collect();
    assert_eq!(successes, vec![true, false, true, false]);
    assert_eq!(outcomes[0].result.data().unwrap()["result"], 6);
}

#[tokio::test]
async fn test_empty_batch() {
    let outcomes = builtin_dispatcher().execute_all(&[]).await;
    assert!(outcomes.is_empty());
}

#[tokio::test]
async fn test_normalize_dispatch_and_format_for_anthropic() {
    let raw = json!({
        "id": "msg_1",
        "type": "message",
        "model": "claude-3-5-haiku-20241022",
        "content": [
            {"type": "text", "text": "Computing."},
            {"type": "tool_use", "id": "toolu_1", "name": "calculator", "input": {"operation": "add", "a": 5, "b": 3}}
        ],
        "stop_reason": "tool_use",
        "usage": {"input_tokens": 20, "output_tokens": 10}
    });
    let response = normalize("anthropic", raw).unwrap();
    assert!(response.tools_used);

    let dispatcher = builtin_dispatcher();
    let outcomes = dispatcher.execute_all(&response.tool_calls).await;
    let messages = tool_result_messages(Vendor::Anthropic, &outcomes);

    assert_eq!(messages.len(), 1);
    let block = &messages[0]["content"][0];
    assert_eq!(block["tool_use_id"], "toolu_1");
    let content = decode(block["content"].as_str().unwrap());
    assert_eq!(content["data"]["result"], 8);
}

#[test]
fn test_definitions_per_vendor() {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);

    let anthropic = tool_definitions(Vendor::Anthropic, &registry);
    assert_eq!(anthropic[0]["name"], "calculator");
    assert!(anthropic[0].get("input_schema").is_some());

    let openai = tool_definitions(Vendor::OpenAi, &registry);
    assert_eq!(openai[0]["type"], "function");
    assert_eq!(openai[0]["function"]["name"], "calculator");
    assert_eq!(openai[1]["function"]["name"], "current_time");
}
