mod common;

use std::sync::Arc;

use common::RegisterBuilder;
use sipserve_registrar_core::{MemoryBindingStore, MemoryDiagnostics, RegistrationPipeline};
use sipserve_sip_core::StatusCode;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_users_get_independent_bindings() {
    let store = Arc::new(MemoryBindingStore::new());
    let pipeline = Arc::new(RegistrationPipeline::new(
        store.clone(),
        Arc::new(MemoryDiagnostics::new()),
    ));

    let users: Vec<String> = (0..32).map(|i| format!("user{}", i)).collect();
    let mut handles = Vec::new();
    for (i, user) in users.iter().enumerate() {
        let pipeline = pipeline.clone();
        let request = RegisterBuilder::new(user)
            .contact(&format!("<sip:{}@10.0.1.{}:5060>", user, i + 1))
            .build();
        handles.push(tokio::spawn(async move {
            let ctx = pipeline.context();
            pipeline.process(&request, &ctx).await.response.status
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::Ok);
    }

    assert_eq!(store.len(), users.len());
    for (i, user) in users.iter().enumerate() {
        let binding = pipeline.bindings().lookup_binding(user).await.unwrap().unwrap();
        assert_eq!(&binding.user, user);
        assert_eq!(binding.host, format!("10.0.1.{}", i + 1));
        assert_eq!(binding.port, 5060);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_refreshes_of_one_user_leave_one_binding() {
    let store = Arc::new(MemoryBindingStore::new());
    let pipeline = Arc::new(RegistrationPipeline::new(
        store.clone(),
        Arc::new(MemoryDiagnostics::new()),
    ));

    let mut handles = Vec::new();
    for port in 6000..6016u16 {
        let pipeline = pipeline.clone();
        let request = RegisterBuilder::new("alice")
            .contact(&format!("<sip:alice@10.0.0.5:{}>", port))
            .build();
        handles.push(tokio::spawn(async move {
            let ctx = pipeline.context();
            pipeline.process(&request, &ctx).await.outcome.is_accepted()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    assert_eq!(store.len(), 1);
    let binding = pipeline.bindings().lookup_binding("alice").await.unwrap().unwrap();
    assert!((6000..6016).contains(&binding.port));
}
