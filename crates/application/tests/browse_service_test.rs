mod helpers;

use ferrous_mdns_application::services::UnicastPreference;
use ferrous_mdns_application::use_cases::BrowseServiceUseCase;
use ferrous_mdns_domain::{DomainError, ServiceName};
use helpers::mock_ports::MockTransport;
use hickory_proto::rr::RecordType;
use std::sync::Arc;

#[tokio::test]
async fn test_browse_sends_ptr_question() {
    let transport = Arc::new(MockTransport::new());
    let browse = BrowseServiceUseCase::new(transport.clone(), Arc::new(UnicastPreference::default()));

    browse
        .execute(&ServiceName::new("service1").unwrap())
        .await
        .unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    let query = &sent[0].queries()[0];
    assert_eq!(query.name().to_ascii(), "_service1._tcp.local.");
    assert_eq!(query.query_type(), RecordType::PTR);
    assert!(!query.mdns_unicast_response());
}

#[tokio::test]
async fn test_browse_follows_unicast_preference_at_send_time() {
    let transport = Arc::new(MockTransport::new());
    let unicast = Arc::new(UnicastPreference::default());
    let browse = BrowseServiceUseCase::new(transport.clone(), unicast.clone());
    let service = ServiceName::new("service2").unwrap();

    browse.execute(&service).await.unwrap();
    unicast.set(true);
    browse.execute(&service).await.unwrap();

    let sent = transport.sent();
    assert!(!sent[0].queries()[0].mdns_unicast_response());
    assert!(sent[1].queries()[0].mdns_unicast_response());
}

#[tokio::test]
async fn test_browse_surfaces_send_failure() {
    let transport = Arc::new(MockTransport::failing());
    let browse = BrowseServiceUseCase::new(transport.clone(), Arc::new(UnicastPreference::default()));

    let result = browse.execute(&ServiceName::new("service1").unwrap()).await;

    assert!(matches!(result, Err(DomainError::Transport(_))));
    assert_eq!(transport.send_calls(), 1);
}
