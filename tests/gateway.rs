use printnode_client::models::{NewAccount, PrintJobRequest};
use printnode_client::{AuthenticatedClient, Credential, Gateway, PrintNodeError};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> Gateway {
    let credential = Credential::ApiKey("test-key".to_string());
    let client = AuthenticatedClient::new(server.uri(), None, credential).unwrap();
    Gateway::new(client)
}

fn computer() -> Value {
    json!({
        "id": 11,
        "name": "RECEPTION-PC",
        "inet": "192.168.1.20",
        "inet6": null,
        "hostname": "reception@RECEPTION-PC",
        "version": "4.27.8",
        "jre": null,
        "createTimestamp": "2023-03-01T09:30:00.000Z",
        "state": "connected"
    })
}

fn printer() -> Value {
    json!({
        "id": 34,
        "computer": computer(),
        "name": "Brother HL-L2350DW",
        "description": "Front desk",
        "capabilities": {},
        "default": true,
        "createTimestamp": "2023-03-01T09:31:00.000Z",
        "state": "online"
    })
}

fn printjob(id: u64) -> Value {
    json!({
        "id": id,
        "printer": printer(),
        "title": "Invoice 1001",
        "contentType": "pdf_uri",
        "source": "printnode-client",
        "expireAt": null,
        "createTimestamp": "2023-03-02T10:00:00.000Z",
        "state": "new"
    })
}

#[tokio::test]
async fn test_account() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/whoami"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 433,
            "firstname": "Peter",
            "lastname": "Tuthill",
            "email": "peter@example.com",
            "canCreateSubAccounts": false,
            "credits": null,
            "numComputers": 1,
            "totalPrints": 9,
            "Tags": {"plan": "pro"},
            "ApiKeys": [],
            "state": "active",
            "permissions": ["Unrestricted"]
        })))
        .mount(&mock_server)
        .await;

    let account = gateway(&mock_server).account().await.unwrap();
    assert_eq!(account.id, 433);
    assert_eq!(account.email, "peter@example.com");
    assert_eq!(account.total_prints, 9);
    assert_eq!(account.tags["plan"], "pro");
}

#[tokio::test]
async fn test_computers_and_printers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/computers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([computer()])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/computers/11/printers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([printer()])))
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let computers = gateway.computers().await.unwrap();
    assert_eq!(computers.len(), 1);
    assert_eq!(computers[0].hostname.as_deref(), Some("reception@RECEPTION-PC"));

    let printers = gateway.printers_on(computers[0].id).await.unwrap();
    assert_eq!(printers[0].name, "Brother HL-L2350DW");
    assert_eq!(printers[0].computer.id, 11);
}

fn scale() -> Value {
    json!({
        "mass": [1250000000, null],
        "deviceName": "PS-USB",
        "deviceNum": 0,
        "port": "USB1",
        "count": null,
        "measurement": {"g": 1250},
        "clientReportedCreateTimestamp": "2023-03-02T10:00:00.000Z",
        "ntpOffset": null,
        "ageOfData": 120,
        "computerId": 11,
        "vendor": "Dymo",
        "product": "M10",
        "vendorId": 2338,
        "productId": 32771
    })
}

#[tokio::test]
async fn test_scales() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/computer/11/scales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([scale()])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/computer/11/scales/PS%20USB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([scale()])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/computer/11/scale/PS-USB/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scale()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let scales = gateway.scales(11).await.unwrap();
    assert_eq!(scales.len(), 1);
    assert_eq!(scales[0].device_name, "PS-USB");
    assert_eq!(scales[0].measurement["g"], 1250);

    let named = gateway.scales_named(11, "PS USB").await.unwrap();
    assert_eq!(named[0].computer_id, 11);

    let one = gateway.scale(11, "PS-USB", 0).await.unwrap();
    assert_eq!(one.mass, vec![Some(1_250_000_000), None]);
    assert_eq!(one.age_of_data, Some(120));
}

#[tokio::test]
async fn test_scale_without_reading() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/computer/11/scale/PS-USB/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "NotFound",
            "message": "No scale data"
        })))
        .mount(&mock_server)
        .await;

    match gateway(&mock_server).scale(11, "PS-USB", 1).await {
        Err(PrintNodeError::Api(err)) => assert_eq!(err.status_code(), 404),
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_print_submits_then_fetches() {
    let mock_server = MockServer::start().await;
    let request = PrintJobRequest::pdf_uri(34, "Invoice 1001", "https://example.com/invoice.pdf");

    Mock::given(method("POST"))
        .and(path("/printjobs"))
        .and(body_json(json!({
            "printerId": 34,
            "title": "Invoice 1001",
            "contentType": "pdf_uri",
            "content": "https://example.com/invoice.pdf",
            "source": "printnode-client"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(473)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/printjobs/473"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([printjob(473)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let job = gateway(&mock_server).print(&request).await.unwrap();
    assert_eq!(job.id, 473);
    assert_eq!(job.printer.id, 34);
    assert_eq!(job.state, "new");
}

#[tokio::test]
async fn test_missing_printjob() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/printjobs/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let err = gateway(&mock_server).printjob(9).await.unwrap_err();
    assert!(matches!(err, PrintNodeError::NotFound(_)));
}

#[tokio::test]
async fn test_states() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/printjobs/states"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            {"printJobId": 473, "state": "new", "message": null, "data": null,
             "clientVersion": null, "createTimestamp": "2023-03-02T10:00:00.000Z", "age": 0},
            {"printJobId": 473, "state": "done", "message": "Printed", "data": null,
             "clientVersion": "4.27.8", "createTimestamp": "2023-03-02T10:00:05.000Z", "age": 5000}
        ]])))
        .mount(&mock_server)
        .await;

    let states = gateway(&mock_server).states().await.unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states[0][1].state, "done");
    assert_eq!(states[0][1].age, Some(5000));
}

#[tokio::test]
async fn test_tag_names_are_escaped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/account/tag/billing%20plan"))
        .and(body_json(json!("pro")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!("created")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway(&mock_server).modify_tag("billing plan", "pro").await.unwrap();
    assert_eq!(result, json!("created"));
}

#[tokio::test]
async fn test_create_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/account/apikey/integration"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!("new-key-value")))
        .mount(&mock_server)
        .await;

    let key = gateway(&mock_server).create_api_key("integration").await.unwrap();
    assert_eq!(key, "new-key-value");
}

#[tokio::test]
async fn test_clientkey_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/client/key/0a756864-602e-428f-a90b-6f2bc6a02d72"))
        .and(query_param("edition", "printnode"))
        .and(query_param("version", "4.7.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("ck-value")))
        .mount(&mock_server)
        .await;

    let key = gateway(&mock_server)
        .clientkey("0a756864-602e-428f-a90b-6f2bc6a02d72", "printnode", "4.7.1")
        .await
        .unwrap();
    assert_eq!(key, "ck-value");
}

#[tokio::test]
async fn test_modify_client_downloads() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/download/clients/12"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"enabled": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([12])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway(&mock_server).modify_client_downloads(12, false).await.unwrap();
    assert_eq!(result, json!([12]));
}

#[tokio::test]
async fn test_create_account_unwraps_account() {
    let mock_server = MockServer::start().await;
    let new_account = NewAccount::new("Ada", "Lovelace", "ada@example.com", "s3cret")
        .with_creator_ref("cust-42");

    Mock::given(method("POST"))
        .and(path("/account"))
        .and(body_json(json!({
            "Account": {
                "firstname": "Ada",
                "lastname": "Lovelace",
                "email": "ada@example.com",
                "password": "s3cret",
                "creatorRef": "cust-42"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "Account": {
                "id": 900,
                "email": "ada@example.com",
                "creatorRef": "cust-42",
                "state": "active"
            },
            "ApiKeys": [],
            "Tags": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let account = gateway(&mock_server).create_account(&new_account).await.unwrap();
    assert_eq!(account.id, 900);
    assert_eq!(account.creator_ref.as_deref(), Some("cust-42"));
}

#[tokio::test]
async fn test_api_errors_pass_through_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/printers"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "code": "TooManyRequests",
            "message": "Rate limit exceeded"
        })))
        .mount(&mock_server)
        .await;

    match gateway(&mock_server).printers().await {
        Err(PrintNodeError::Api(err)) => {
            assert_eq!(err.status_code(), 429);
            assert_eq!(err.message(), "Rate limit exceeded");
            assert!(err.is_client_error());
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}
