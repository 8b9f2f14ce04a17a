//! Repository and service behaviour against a real Redis 8 container.

use domain_items::codec::encode_embedding;
use domain_items::{
    CreateItem, DistanceMetric, IndexSchema, ItemRepository, ItemService, RedisItemRepository,
    SearchItems, StoredItem, UpdateItem,
};
use test_utils::{TestDataBuilder, TestRedis, vector_bytes};
use uuid::Uuid;

const DIM: usize = 4;

async fn setup() -> (TestRedis, ItemService<RedisItemRepository>) {
    let redis = TestRedis::new().await;
    let repository = RedisItemRepository::new(redis.connection_manager().await);
    let service = ItemService::new(repository);
    (redis, service)
}

fn create_input(builder: &TestDataBuilder, suffix: &str, vector: &[f32]) -> CreateItem {
    CreateItem {
        title: builder.title(suffix),
        author: "Erté".to_string(),
        image_url: format!("https://img/{suffix}.jpg"),
        embedding: encode_embedding(&vector_bytes(vector)),
    }
}

#[tokio::test]
async fn test_add_get_delete_scenario() {
    let (_redis, service) = setup().await;

    let created = service
        .add(CreateItem {
            title: "T".into(),
            author: "A".into(),
            image_url: "u".into(),
            embedding: encode_embedding(&[0x00, 0x01]),
        })
        .await
        .unwrap();
    assert!(Uuid::parse_str(&created.id).is_ok());

    let fetched = service.get(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.embedding, "AAE=");

    let deleted = service.delete(&created.id).await.unwrap().unwrap();
    assert_eq!(deleted.id, created.id);

    assert!(service.get(&created.id).await.unwrap().is_none());
    assert!(service.delete(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_embedding_bytes_survive_storage() {
    let (_redis, service) = setup().await;
    let bytes: Vec<u8> = (0..=255).collect();

    let created = service
        .add(CreateItem {
            title: "All bytes".into(),
            author: "A".into(),
            image_url: "u".into(),
            embedding: encode_embedding(&bytes),
        })
        .await
        .unwrap();

    let fetched = service.get(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.embedding, encode_embedding(&bytes));
}

#[tokio::test]
async fn test_update_replaces_fields_and_skips_missing() {
    let (_redis, service) = setup().await;
    let builder = TestDataBuilder::from_test_name("test_update_replaces_fields");

    let created = service
        .add(create_input(&builder, "before", &builder.embedding(DIM)))
        .await
        .unwrap();

    let update = UpdateItem {
        title: builder.title("after"),
        author: "Cassandre".into(),
        image_url: "https://img/after.jpg".into(),
        embedding: "AAE=".into(),
    };
    let updated = service.update(&created.id, update.clone()).await.unwrap().unwrap();
    assert_eq!(updated.id, created.id);

    let fetched = service.get(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, builder.title("after"));
    assert_eq!(fetched.author, "Cassandre");
    assert_eq!(fetched.embedding, "AAE=");

    let missing = Uuid::now_v7().to_string();
    assert!(service.update(&missing, update).await.unwrap().is_none());
    assert!(!service.item_exists(&missing).await.unwrap());
}

#[tokio::test]
async fn test_ensure_index_is_idempotent() {
    let (redis, _service) = setup().await;
    let repository = RedisItemRepository::new(redis.connection_manager().await);
    let schema = IndexSchema::new(DIM);

    assert!(repository.ensure_index(&schema).await.unwrap());
    assert!(!repository.ensure_index(&schema).await.unwrap());
}

#[tokio::test]
async fn test_search_ranks_nearest_first() {
    let (_redis, service) = setup().await;
    let builder = TestDataBuilder::from_test_name("test_search_ranks_nearest_first");

    service
        .ensure_index(&IndexSchema::new(DIM).with_distance_metric(DistanceMetric::L2))
        .await
        .unwrap();

    let target = [1.0, 0.0, 0.0, 0.0];
    let target_item = service
        .add(create_input(&builder, "target", &target))
        .await
        .unwrap();
    for i in 0..7 {
        let far = [0.0, 1.0 + i as f32, 0.5, 0.5];
        service
            .add(create_input(&builder, &format!("far-{i}"), &far))
            .await
            .unwrap();
    }

    let results = service
        .search(SearchItems {
            embedding: encode_embedding(&vector_bytes(&target)),
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(results[0].id, target_item.id);
    assert!(results[0].score.abs() < 1e-6);
    assert!(results.windows(2).all(|w| w[0].score <= w[1].score));
    assert_eq!(results[0].embedding, target_item.embedding);
}

#[tokio::test]
async fn test_search_without_index_is_store_error() {
    let (_redis, service) = setup().await;

    let result = service
        .search(SearchItems {
            embedding: encode_embedding(&vector_bytes(&[0.0; DIM])),
        })
        .await;

    assert!(matches!(result, Err(domain_items::ItemError::Store(_))));
}

#[tokio::test]
async fn test_items_with_foreign_ids_stay_reachable() {
    let (redis, service) = setup().await;
    let repository = RedisItemRepository::new(redis.connection_manager().await);
    repository.ensure_index(&IndexSchema::new(DIM)).await.unwrap();

    let ulid = "01HV6Z8Q3K9J4W2X5Y7A1B3C4D";
    let vector = [0.5, 0.5, 0.5, 0.5];
    repository
        .save(&StoredItem {
            id: ulid.to_string(),
            title: "Chrysler Building".into(),
            author: "Van Alen".into(),
            image_url: "https://img/chrysler.jpg".into(),
            embedding: vector_bytes(&vector),
        })
        .await
        .unwrap();

    let fetched = service.get(ulid).await.unwrap().unwrap();
    assert_eq!(fetched.id, ulid);

    let results = service
        .search(SearchItems {
            embedding: encode_embedding(&vector_bytes(&vector)),
        })
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, ulid);

    assert!(service.delete(ulid).await.unwrap().is_some());
}
