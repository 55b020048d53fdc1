//! Disposal Tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use hostbridge_domain::ports::{AsyncDisposable, Disposable};
use hostbridge_domain::{Error, ErrorCode, Lifecycle, Result, ServiceToken};
use hostbridge_infrastructure::di::{Constructed, ContainerState, ServiceContainer};
use tokio::sync::{Barrier, Notify};

#[derive(Debug, Default)]
struct SyncResource {
    disposed: AtomicUsize,
}

impl Disposable for SyncResource {
    fn dispose(&self) -> Result<()> {
        self.disposed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingResource;

impl Disposable for FailingResource {
    fn dispose(&self) -> Result<()> {
        Err(Error::operation_failed("socket already closed"))
    }
}

struct AsyncResource {
    disposed: AtomicUsize,
    barrier: Option<Arc<Barrier>>,
}

impl AsyncResource {
    fn new(barrier: Option<Arc<Barrier>>) -> Self {
        Self {
            disposed: AtomicUsize::new(0),
            barrier,
        }
    }
}

#[async_trait]
impl AsyncDisposable for AsyncResource {
    async fn dispose_async(&self) -> Result<()> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        } else {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.disposed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn register_sync(
    container: &ServiceContainer,
    token: &ServiceToken<SyncResource>,
) -> Arc<SyncResource> {
    let resource = Arc::new(SyncResource::default());
    let shared = Arc::clone(&resource);
    container
        .register_factory(
            token,
            move |_| {
                let hook: Arc<dyn Disposable> = shared.clone();
                Ok(Constructed::new(shared.clone()).with_teardown(hook))
            },
            Lifecycle::Singleton,
            &[],
        )
        .unwrap();
    resource
}

fn register_async(
    container: &ServiceContainer,
    token: &ServiceToken<AsyncResource>,
    barrier: Option<Arc<Barrier>>,
) -> Arc<AsyncResource> {
    let resource = Arc::new(AsyncResource::new(barrier));
    let shared = Arc::clone(&resource);
    container
        .register_factory(
            token,
            move |_| {
                let hook: Arc<dyn AsyncDisposable> = shared.clone();
                Ok(Constructed::new(shared.clone()).with_async_teardown(hook))
            },
            Lifecycle::Singleton,
            &[],
        )
        .unwrap();
    resource
}

#[test]
fn test_dispose_runs_sync_teardown_once() {
    let token: ServiceToken<SyncResource> = ServiceToken::new("Sync");
    let container = ServiceContainer::new();
    let resource = register_sync(&container, &token);
    container.validate().unwrap();
    container.resolve(&token).unwrap();

    container.dispose().unwrap();
    container.dispose().unwrap();

    assert_eq!(resource.disposed.load(Ordering::SeqCst), 1);
    assert_eq!(container.state(), ContainerState::Disposed);
    assert_eq!(container.singleton_count(), 0);
}

#[test]
fn test_unresolved_singletons_are_not_disposed() {
    let token: ServiceToken<SyncResource> = ServiceToken::new("Sync");
    let container = ServiceContainer::new();
    let resource = register_sync(&container, &token);
    container.validate().unwrap();

    container.dispose().unwrap();

    assert_eq!(resource.disposed.load(Ordering::SeqCst), 0);
}

#[test]
fn test_value_registrations_are_never_disposed() {
    let token: ServiceToken<SyncResource> = ServiceToken::new("Owned");
    let resource = Arc::new(SyncResource::default());
    let container = ServiceContainer::new();
    container.register_value(&token, Arc::clone(&resource)).unwrap();
    container.validate().unwrap();
    container.resolve(&token).unwrap();

    container.dispose().unwrap();

    assert_eq!(resource.disposed.load(Ordering::SeqCst), 0);
}

#[test]
fn test_everything_fails_after_disposal() {
    let token: ServiceToken<SyncResource> = ServiceToken::new("Sync");
    let late: ServiceToken<str> = ServiceToken::new("Late");
    let container = ServiceContainer::new();
    register_sync(&container, &token);
    container.validate().unwrap();
    container.dispose().unwrap();

    assert_eq!(container.resolve(&token).unwrap_err().code(), ErrorCode::Disposed);
    assert_eq!(
        container.register_value(&late, Arc::from("late")).unwrap_err().code(),
        ErrorCode::Disposed
    );
    assert_eq!(container.validate().unwrap_err().code(), ErrorCode::Disposed);
    assert_eq!(container.registration_count(), 0);
}

#[test]
fn test_dispose_without_validation() {
    let container = ServiceContainer::new();
    container.dispose().unwrap();
    assert!(container.is_disposed());
}

#[test]
fn test_teardown_failures_are_aggregated() {
    let failing: ServiceToken<FailingResource> = ServiceToken::new("Failing");
    let healthy: ServiceToken<SyncResource> = ServiceToken::new("Healthy");
    let container = ServiceContainer::new();
    container
        .register_factory(
            &failing,
            |_| {
                let resource = Arc::new(FailingResource);
                let hook: Arc<dyn Disposable> = resource.clone();
                Ok(Constructed::new(resource).with_teardown(hook))
            },
            Lifecycle::Singleton,
            &[],
        )
        .unwrap();
    let resource = register_sync(&container, &healthy);
    container.validate().unwrap();
    container.resolve(&failing).unwrap();
    container.resolve(&healthy).unwrap();

    let err = container.dispose().unwrap_err();

    assert_eq!(err.code(), ErrorCode::DisposalFailed);
    assert!(err.to_string().contains("socket already closed"));
    assert_eq!(resource.disposed.load(Ordering::SeqCst), 1);
    assert!(container.is_disposed());
}

#[test]
fn test_sync_dispose_without_runtime_reports_async_hooks() {
    let token: ServiceToken<AsyncResource> = ServiceToken::new("Async");
    let container = ServiceContainer::new();
    let resource = register_async(&container, &token, None);
    container.validate().unwrap();
    container.resolve(&token).unwrap();

    let err = container.dispose().unwrap_err();

    assert_eq!(err.code(), ErrorCode::DisposalFailed);
    assert_eq!(resource.disposed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sync_dispose_inside_runtime_spawns_async_hooks() {
    let token: ServiceToken<AsyncResource> = ServiceToken::new("Async");
    let container = ServiceContainer::new();
    let resource = register_async(&container, &token, None);
    container.validate().unwrap();
    container.resolve(&token).unwrap();

    container.dispose().unwrap();

    for _ in 0..100 {
        if resource.disposed.load(Ordering::SeqCst) == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(resource.disposed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dispose_async_handles_mixed_teardown() {
    let sync_token: ServiceToken<SyncResource> = ServiceToken::new("Sync");
    let async_token: ServiceToken<AsyncResource> = ServiceToken::new("Async");
    let container = ServiceContainer::new();
    let sync_resource = register_sync(&container, &sync_token);
    let async_resource = register_async(&container, &async_token, None);
    container.validate().unwrap();
    container.resolve(&sync_token).unwrap();
    container.resolve(&async_token).unwrap();

    container.dispose_async().await.unwrap();

    assert_eq!(sync_resource.disposed.load(Ordering::SeqCst), 1);
    assert_eq!(async_resource.disposed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dispose_async_awaits_hooks_concurrently() {
    // Both hooks wait on the same barrier, so sequential teardown would hang
    let barrier = Arc::new(Barrier::new(2));
    let first: ServiceToken<AsyncResource> = ServiceToken::new("First");
    let second: ServiceToken<AsyncResource> = ServiceToken::new("Second");
    let container = ServiceContainer::new();
    let first_resource = register_async(&container, &first, Some(barrier.clone()));
    let second_resource = register_async(&container, &second, Some(barrier));
    container.validate().unwrap();
    container.resolve(&first).unwrap();
    container.resolve(&second).unwrap();

    tokio::time::timeout(Duration::from_secs(5), container.dispose_async())
        .await
        .expect("teardown hooks ran sequentially")
        .unwrap();

    assert_eq!(first_resource.disposed.load(Ordering::SeqCst), 1);
    assert_eq!(second_resource.disposed.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispose_async_is_idempotent() {
    let token: ServiceToken<AsyncResource> = ServiceToken::new("Async");
    let container = ServiceContainer::new();
    let resource = register_async(&container, &token, None);
    container.validate().unwrap();
    container.resolve(&token).unwrap();

    let (first, second) = tokio::join!(container.dispose_async(), container.dispose_async());
    first.unwrap();
    second.unwrap();
    container.dispose().unwrap();

    assert_eq!(resource.disposed.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_singleton_built_during_disposal_is_torn_down() {
    let token: ServiceToken<AsyncResource> = ServiceToken::new("Slow");
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let resource = Arc::new(AsyncResource::new(None));
    let container = ServiceContainer::new();
    {
        let (started, release, shared) = (started.clone(), release.clone(), resource.clone());
        container
            .register_async_factory(
                &token,
                move |_| {
                    let (started, release, shared) =
                        (started.clone(), release.clone(), shared.clone());
                    async move {
                        started.notify_one();
                        release.notified().await;
                        let hook: Arc<dyn AsyncDisposable> = shared.clone();
                        Ok(Constructed::new(shared).with_async_teardown(hook))
                    }
                },
                Lifecycle::Singleton,
                &[],
            )
            .unwrap();
    }
    container.validate().unwrap();

    let resolving = tokio::spawn({
        let container = container.clone();
        async move { container.resolve_async(&token).await.map(|_| ()) }
    });
    started.notified().await;
    container.dispose_async().await.unwrap();
    release.notify_one();

    let outcome = resolving.await.unwrap();
    assert_eq!(outcome.unwrap_err().code(), ErrorCode::Disposed);
    assert_eq!(resource.disposed.load(Ordering::SeqCst), 1);
    assert_eq!(container.singleton_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sync_singleton_built_during_disposal_spawns_async_teardown() {
    let token: ServiceToken<AsyncResource> = ServiceToken::new("SlowSync");
    let started = Arc::new(std::sync::Barrier::new(2));
    let release = Arc::new(std::sync::Barrier::new(2));
    let resource = Arc::new(AsyncResource::new(None));
    let container = ServiceContainer::new();
    {
        let (started, release, shared) = (started.clone(), release.clone(), resource.clone());
        container
            .register_factory(
                &token,
                move |_| {
                    started.wait();
                    release.wait();
                    let hook: Arc<dyn AsyncDisposable> = shared.clone();
                    Ok(Constructed::new(shared.clone()).with_async_teardown(hook))
                },
                Lifecycle::Singleton,
                &[],
            )
            .unwrap();
    }
    container.validate().unwrap();

    let resolving = tokio::task::spawn_blocking({
        let container = container.clone();
        move || container.resolve(&token).map(|_| ())
    });
    tokio::task::spawn_blocking(move || {
        started.wait();
    })
    .await
    .unwrap();
    container.dispose_async().await.unwrap();
    tokio::task::spawn_blocking(move || {
        release.wait();
    })
    .await
    .unwrap();

    let outcome = resolving.await.unwrap();
    assert_eq!(outcome.unwrap_err().code(), ErrorCode::Disposed);
    for _ in 0..100 {
        if resource.disposed.load(Ordering::SeqCst) == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(resource.disposed.load(Ordering::SeqCst), 1);
}
