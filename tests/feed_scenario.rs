use murmur::app::{AppContext, MurmurError};
use murmur::config::StoreConfig;
use murmur::domain::Post;
use murmur::store::StoreBackend;

fn sqlite_context(dir: &tempfile::TempDir) -> AppContext {
    AppContext::from_store_config(&StoreConfig {
        backend: StoreBackend::Sqlite,
        path: Some(dir.path().join("murmur.db")),
    })
    .unwrap()
}

fn publish(ctx: &mut AppContext, content: &str) -> Post {
    ctx.presenter.begin_edit(Post::empty());
    ctx.presenter.set_edit_content(content);
    ctx.presenter.commit_edit().unwrap()
}

fn post(ctx: &AppContext, id: i64) -> Post {
    ctx.presenter
        .posts()
        .into_iter()
        .find(|p| p.id == id)
        .unwrap()
}

#[test]
fn test_feed_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = sqlite_context(&dir);
    let feed = ctx.presenter.observe_all().unwrap();

    let a = publish(&mut ctx, "hello");
    let b = publish(&mut ctx, "world");
    assert_eq!((a.id, b.id), (1, 2));

    let ids: Vec<i64> = feed.borrow().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);

    ctx.presenter.like(1).unwrap();
    let liked = post(&ctx, 1);
    assert!(liked.liked_by_me);
    assert_eq!(liked.likes, 1);

    ctx.presenter.like(1).unwrap();
    let unliked = post(&ctx, 1);
    assert!(!unliked.liked_by_me);
    assert_eq!(unliked.likes, 0);

    ctx.presenter.share(2).unwrap();
    ctx.presenter.share(2).unwrap();
    assert_eq!(post(&ctx, 2).repost, 2);

    ctx.presenter.remove(1).unwrap();
    let remaining = feed.borrow().clone();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 2);
    assert_eq!(remaining[0].content, "world");
}

#[test]
fn test_feed_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut ctx = sqlite_context(&dir);
        let a = publish(&mut ctx, "kept");
        ctx.presenter.like(a.id).unwrap();
        ctx.presenter.share(a.id).unwrap();
    }

    let mut ctx = sqlite_context(&dir);
    let restored = post(&ctx, 1);
    assert_eq!(restored.content, "kept");
    assert_eq!(restored.author, "Me");
    assert_eq!(restored.published, "now");
    assert!(restored.liked_by_me);
    assert_eq!((restored.likes, restored.repost), (1, 1));

    ctx.presenter.begin_edit(restored.clone());
    ctx.presenter.set_edit_content("kept, edited");
    let edited = ctx.presenter.commit_edit().unwrap();
    assert_eq!(edited, restored.with_content("kept, edited"));
}

#[test]
fn test_every_backend_behaves_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let configs = [
        StoreConfig {
            backend: StoreBackend::Memory,
            path: None,
        },
        StoreConfig {
            backend: StoreBackend::File,
            path: Some(dir.path().join("posts.json")),
        },
        StoreConfig {
            backend: StoreBackend::Sqlite,
            path: Some(dir.path().join("posts.db")),
        },
    ];

    for config in &configs {
        let mut ctx = AppContext::from_store_config(config).unwrap();
        let a = publish(&mut ctx, "a");
        publish(&mut ctx, "b");
        ctx.presenter.like(a.id).unwrap();
        ctx.presenter.remove(404).unwrap();

        let posts = ctx.presenter.posts();
        assert_eq!(posts.len(), 2, "{:?}", config.backend);
        assert_eq!(posts[0].content, "b", "{:?}", config.backend);
        assert!(posts[1].liked_by_me, "{:?}", config.backend);

        ctx.presenter.begin_edit(Post {
            id: 404,
            ..Post::draft("ghost")
        });
        assert!(
            matches!(ctx.presenter.commit_edit(), Err(MurmurError::NotFound(404))),
            "{:?}",
            config.backend
        );
    }
}
