/// Basic integration tests driving the server through JSON-RPC lines
use chrono::{Duration, Utc};
use habit_tracker_server::*;
use serde_json::{json, Value};

struct Client {
    server: McpServer,
    next_id: u64,
}

impl Client {
    fn new() -> Self {
        Self {
            server: McpServer::new(HabitTrackerServer::new(ServerConfig::default())),
            next_id: 1,
        }
    }

    async fn request(&mut self, method: &str, params: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;

        let line = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params })
            .to_string();
        let response = self
            .server
            .process_line(&line)
            .await
            .expect("requests always get a response");
        let response = serde_json::to_value(response).unwrap();
        assert_eq!(response["id"], id);
        response
    }

    /// Call a tool and return its envelope
    async fn tool(&mut self, name: &str, arguments: Value) -> Value {
        let response = self
            .request("tools/call", json!({ "name": name, "arguments": arguments }))
            .await;
        let result = &response["result"];
        let text = result["content"][0]["text"].as_str().unwrap();
        let envelope: Value = serde_json::from_str(text).unwrap();
        assert_eq!(result["isError"], !envelope["success"].as_bool().unwrap());
        envelope
    }
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_and_list_tools() {
        let mut client = Client::new();

        let init = client
            .request(
                "initialize",
                json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "test-client", "version": "1.0" }
                }),
            )
            .await;
        assert_eq!(init["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(init["result"]["capabilities"]["tools"]["listChanged"], false);

        let tools = client.request("tools/list", json!({})).await;
        let names: Vec<&str> = tools["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "habit_list",
                "habit_create",
                "habit_get",
                "habit_update",
                "habit_delete",
                "habit_duplicate"
            ]
        );
        assert!(tools["result"]["tools"][1]["inputSchema"]["properties"]["nomeHabito"].is_object());
    }

    #[tokio::test]
    async fn test_habit_lifecycle() {
        let mut client = Client::new();

        let created = client
            .tool(
                "habit_create",
                json!({
                    "nomeHabito": "Morning yoga",
                    "descricao": "Sun salutations",
                    "frequencia": "semanal",
                    "diasSemana": ["segunda", "quarta"],
                    "horarioInicio": "06:30",
                    "duracaoEstimada": 20,
                    "categoriaId": 2
                }),
            )
            .await;
        assert_eq!(created["success"], true);
        let id = created["data"]["id"].clone();

        let updated = client
            .tool(
                "habit_update",
                json!({ "id": id, "status": "inativo", "horarioInicio": null }),
            )
            .await;
        assert_eq!(updated["data"]["status"], "inativo");
        assert!(updated["data"]["horarioInicio"].is_null());
        assert_eq!(updated["data"]["descricao"], "Sun salutations");

        let copy = client
            .tool("habit_duplicate", json!({ "id": id, "nomeNovoHabito": "Evening yoga" }))
            .await;
        assert_eq!(copy["data"]["id"], 2);
        assert_eq!(copy["data"]["status"], "ativo");
        assert_eq!(copy["data"]["diasSemana"], json!(["segunda", "quarta"]));
        assert_eq!(copy["data"]["categoriaId"], 2);

        let listed = client.tool("habit_list", json!({ "ordenacao": "nome_asc" })).await;
        assert_eq!(listed["metadata"]["total"], 2);
        assert_eq!(listed["data"][0]["nomeHabito"], "Evening yoga");

        let deleted = client.tool("habit_delete", json!({ "id": id })).await;
        assert_eq!(deleted["data"]["deleted"], true);

        let missing = client.tool("habit_get", json!({ "id": id })).await;
        assert_eq!(missing["success"], false);
        assert_eq!(missing["error"]["code"], "NOT_FOUND");
        assert_eq!(missing["error"]["message"], "Habit not found");
    }

    #[tokio::test]
    async fn test_list_filters_and_pagination() {
        let mut client = Client::new();
        for i in 0..5 {
            client
                .tool(
                    "habit_create",
                    json!({ "nomeHabito": format!("Daily {}", i), "frequencia": "diária" }),
                )
                .await;
        }
        client
            .tool(
                "habit_create",
                json!({ "nomeHabito": "Rent", "frequencia": "mensal", "diasMes": [5] }),
            )
            .await;

        let monthly = client.tool("habit_list", json!({ "frequencia": "mensal" })).await;
        assert_eq!(monthly["metadata"]["total"], 1);
        assert_eq!(monthly["data"][0]["nomeHabito"], "Rent");

        let page = client.tool("habit_list", json!({ "page": 3, "pageSize": 2 })).await;
        assert_eq!(page["metadata"]["total"], 6);
        assert_eq!(page["metadata"]["page"], 3);
        assert_eq!(page["data"].as_array().unwrap().len(), 2);

        let beyond = client.tool("habit_list", json!({ "page": 4, "pageSize": 2 })).await;
        assert_eq!(beyond["data"], json!([]));
        assert_eq!(beyond["metadata"]["total"], 6);

        let too_big = client.tool("habit_list", json!({ "pageSize": 500 })).await;
        assert_eq!(too_big["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_error_envelopes() {
        let mut client = Client::new();

        let invalid = client
            .tool("habit_create", json!({ "nomeHabito": "Gym", "frequencia": "semanal" }))
            .await;
        assert_eq!(invalid["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(invalid["error"]["details"][0]["path"], "diasSemana");
        assert!(invalid["timestamp"].is_string());

        let bad_id = client.tool("habit_get", json!({ "id": "abc" })).await;
        assert_eq!(bad_id["error"]["code"], "INVALID_ID");

        let zero_get = client.tool("habit_get", json!({ "id": 0 })).await;
        assert_eq!(zero_get["error"]["code"], "NOT_FOUND");

        let zero_delete = client.tool("habit_delete", json!({ "id": -1 })).await;
        assert_eq!(zero_delete["error"]["code"], "NOT_FOUND");

        let zero_update = client
            .tool("habit_update", json!({ "id": 0, "nomeHabito": "Nope" }))
            .await;
        assert_eq!(zero_update["error"]["code"], "VALIDATION_ERROR");

        let update_missing = client
            .tool("habit_update", json!({ "id": 9, "nomeHabito": "Nope" }))
            .await;
        assert_eq!(update_missing["error"]["code"], "NOT_FOUND");

        let duplicate_missing = client
            .tool("habit_duplicate", json!({ "id": 9, "nomeNovoHabito": "Copy" }))
            .await;
        assert_eq!(duplicate_missing["error"]["message"], "Original habit not found");

        let unknown = client.request("tools/call", json!({ "name": "habit_log" })).await;
        assert_eq!(unknown["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_null_for_required_update_fields() {
        let mut client = Client::new();
        client
            .tool("habit_create", json!({ "nomeHabito": "Meditate", "frequencia": "diária" }))
            .await;

        for field in ["nomeHabito", "frequencia", "dataInicio", "status"] {
            let mut arguments = json!({ "id": 1 });
            arguments[field] = Value::Null;
            let rejected = client.tool("habit_update", arguments).await;
            assert_eq!(rejected["error"]["code"], "VALIDATION_ERROR", "null {}", field);
        }

        let fetched = client.tool("habit_get", json!({ "id": 1 })).await;
        assert_eq!(fetched["data"]["nomeHabito"], "Meditate");
    }

    #[tokio::test]
    async fn test_calendar_dates_from_a_date_input() {
        let mut client = Client::new();
        let today = Utc::now().date_naive();
        let day = |offset: i64| (today + Duration::days(offset)).format("%Y-%m-%d").to_string();

        let created = client
            .tool(
                "habit_create",
                json!({
                    "nomeHabito": "Couch to 5k",
                    "frequencia": "diária",
                    "dataInicio": day(0),
                    "dataTermino": day(60)
                }),
            )
            .await;
        assert_eq!(created["success"], true);
        assert_eq!(created["data"]["dataInicio"], format!("{}T00:00:00Z", day(0)));
        assert_eq!(created["data"]["dataTermino"], format!("{}T00:00:00Z", day(60)));

        let updated = client
            .tool(
                "habit_update",
                json!({
                    "id": created["data"]["id"],
                    "dataInicio": day(7),
                    "dataTermino": day(90)
                }),
            )
            .await;
        assert_eq!(updated["success"], true);
        assert_eq!(updated["data"]["dataInicio"], format!("{}T00:00:00Z", day(7)));
        assert_eq!(updated["data"]["dataTermino"], format!("{}T00:00:00Z", day(90)));

        let backwards = client
            .tool("habit_update", json!({ "id": 1, "dataTermino": day(3) }))
            .await;
        assert_eq!(backwards["error"]["details"][0]["path"], "dataTermino");
    }
}
