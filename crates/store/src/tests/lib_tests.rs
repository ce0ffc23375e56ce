use super::*;

fn draft(name: &str, power: &str) -> HeroDraft {
    HeroDraft {
        name: name.to_string(),
        power: power.to_string(),
    }
}

fn record(id: i64, name: &str, power: &str) -> HeroRecord {
    HeroRecord {
        id: HeroId(id),
        name: name.to_string(),
        power: power.to_string(),
    }
}

fn seeded_store() -> MemoryStore {
    MemoryStore::with_records(
        LatencyProfile::none(),
        vec![record(1, "Capitão Cometa", "Voar")],
    )
}

#[tokio::test]
async fn create_assigns_an_id_unseen_before_the_call() {
    let store = seeded_store();
    let existing: Vec<HeroId> = store
        .list()
        .await
        .expect("list")
        .iter()
        .map(|r| r.id)
        .collect();

    let flash = store
        .create(draft("Flash", "Velocidade"))
        .await
        .expect("create");
    assert!(!existing.contains(&flash.id));
    assert_eq!(flash.name, "Flash");
    assert_eq!(flash.power, "Velocidade");

    let listed = store.list().await.expect("list");
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn rapid_sequential_creates_never_collide() {
    let store = MemoryStore::new(LatencyProfile::none());
    let mut seen = Vec::new();
    for n in 0..32 {
        let created = store
            .create(draft(&format!("hero-{n}"), "power"))
            .await
            .expect("create");
        assert!(!seen.contains(&created.id), "id {:?} reissued", created.id);
        seen.push(created.id);
    }
}

#[tokio::test]
async fn update_replaces_fields_in_place() {
    let store = MemoryStore::with_records(
        LatencyProfile::none(),
        vec![
            record(1, "Capitão Cometa", "Voar"),
            record(2, "Gigante Gentil", "Super-força"),
        ],
    );

    let updated = store
        .update(record(1, "Cometa", "Voar"))
        .await
        .expect("update");
    assert_eq!(updated.id, HeroId(1));

    let listed = store.list().await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, HeroId(1));
    assert_eq!(listed[0].name, "Cometa");
    assert_eq!(listed[1].name, "Gigante Gentil");
}

#[tokio::test]
async fn update_for_unknown_id_echoes_input_and_changes_nothing() {
    let store = seeded_store();
    let ghost = record(999, "Fantasma", "Intangibilidade");

    let echoed = store.update(ghost.clone()).await.expect("update");
    assert_eq!(echoed, ghost);

    let listed = store.list().await.expect("list");
    assert_eq!(listed, vec![record(1, "Capitão Cometa", "Voar")]);
}

#[tokio::test]
async fn delete_removes_exactly_the_requested_record() {
    let store = MemoryStore::with_records(
        LatencyProfile::none(),
        vec![
            record(1, "Capitão Cometa", "Voar"),
            record(2, "Gigante Gentil", "Super-força"),
        ],
    );

    let receipt = store.delete(HeroId(1)).await.expect("delete");
    assert_eq!(receipt.id, HeroId(1));

    let listed = store.list().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert!(listed.iter().all(|r| r.id != HeroId(1)));
}

#[tokio::test]
async fn delete_for_unknown_id_still_returns_a_receipt() {
    let store = seeded_store();

    let receipt = store.delete(HeroId(999)).await.expect("delete");
    assert_eq!(receipt.id, HeroId(999));

    let listed = store.list().await.expect("list");
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn create_then_update_round_trip_keeps_a_single_record() {
    let store = MemoryStore::new(LatencyProfile::none());
    let created = store
        .create(draft("Trovão Sónico", "Manipulação do som"))
        .await
        .expect("create");

    let renamed = HeroRecord {
        name: "Trovão".to_string(),
        ..created.clone()
    };
    store.update(renamed).await.expect("update");

    let listed = store.list().await.expect("list");
    let matches: Vec<_> = listed.iter().filter(|r| r.id == created.id).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "Trovão");
    assert_eq!(matches[0].power, "Manipulação do som");
}

#[tokio::test]
async fn list_returns_a_disposable_snapshot() {
    let store = seeded_store();

    let mut listed = store.list().await.expect("list");
    listed.clear();

    let relisted = store.list().await.expect("list");
    assert_eq!(relisted.len(), 1);
}

#[tokio::test]
async fn instability_fails_every_operation_until_cleared() {
    let store = seeded_store();
    store.set_unstable(true);

    store.list().await.expect_err("list must fail");
    store
        .create(draft("Flash", "Velocidade"))
        .await
        .expect_err("create must fail");
    store
        .update(record(1, "Cometa", "Voar"))
        .await
        .expect_err("update must fail");
    store.delete(HeroId(1)).await.expect_err("delete must fail");

    store.set_unstable(false);
    let listed = store.list().await.expect("list recovers");
    assert_eq!(listed.len(), 1, "failed operations must not mutate state");
}
