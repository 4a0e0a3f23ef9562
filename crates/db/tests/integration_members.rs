//! Integration-Tests fuer den In-Memory MemberStore

use ultramar_db::{DbError, InMemoryMemberStore, MemberPatch, MemberStore, NeuesMitglied};

#[tokio::test]
async fn mitglied_erstellen_und_laden() {
    let store = InMemoryMemberStore::neu();

    let cato = store
        .erstellen(NeuesMitglied {
            name: "Cato",
            passwort_hash: "hash_cato",
            rang: "Sergeant",
            aktiv: true,
        })
        .await
        .expect("Mitglied erstellen fehlgeschlagen");

    let nach_id = store
        .finde_nach_id(cato.id)
        .await
        .expect("finde_nach_id fehlgeschlagen")
        .expect("Mitglied sollte gefunden werden");
    assert_eq!(nach_id, cato);

    let nach_name = store
        .finde_nach_name("Cato")
        .await
        .unwrap()
        .expect("Mitglied 'Cato' sollte gefunden werden");
    assert_eq!(nach_name.id, cato.id);
    assert_eq!(nach_name.rang, "Sergeant");
}

#[tokio::test]
async fn namenssuche_beachtet_gross_kleinschreibung() {
    let store = InMemoryMemberStore::neu();
    store
        .erstellen(NeuesMitglied {
            name: "Cato",
            passwort_hash: "hash",
            rang: "sergeant",
            aktiv: true,
        })
        .await
        .unwrap();

    assert!(store.finde_nach_name("cato").await.unwrap().is_none());
    assert!(store.finde_nach_name("CATO").await.unwrap().is_none());
    assert!(store.finde_nach_name("Cato").await.unwrap().is_some());
}

#[tokio::test]
async fn doppelter_name_schlaegt_fehl() {
    let store = InMemoryMemberStore::neu();
    let neu = NeuesMitglied {
        name: "Duplikat",
        passwort_hash: "hash",
        rang: "legionary",
        aktiv: true,
    };
    store.erstellen(neu.clone()).await.unwrap();

    let ergebnis = store.erstellen(neu).await;
    assert!(matches!(ergebnis, Err(DbError::NameVergeben(_))));
}

#[tokio::test]
async fn aktualisieren_mit_patch() {
    let store = InMemoryMemberStore::neu();
    let record = store
        .erstellen(NeuesMitglied {
            name: "Marneus",
            passwort_hash: "hash",
            rang: "captain",
            aktiv: true,
        })
        .await
        .unwrap();

    let aktualisiert = store
        .aktualisieren(
            record.id,
            MemberPatch {
                rang: Some("chapter master".into()),
                aktiv: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(aktualisiert.rang, "chapter master");
    assert!(!aktualisiert.aktiv);

    let geladen = store.finde_nach_id(record.id).await.unwrap().unwrap();
    assert_eq!(geladen, aktualisiert);
}

#[tokio::test]
async fn aktualisieren_unbekannter_id() {
    let store = InMemoryMemberStore::neu();
    let ergebnis = store
        .aktualisieren(ultramar_core::MemberId::new(), MemberPatch::default())
        .await;
    assert!(matches!(ergebnis, Err(DbError::MitgliedUnbekannt(_))));
}

#[tokio::test]
async fn store_aus_toml_datei() {
    let inhalt = r#"
        [[mitglied]]
        name = "Cato"
        passwort_hash = "hash_cato"
        rang = "Sergeant"

        [[mitglied]]
        name = "Marneus"
        passwort_hash = "hash_marneus"
        rang = "Chapter Master"
        aktiv = false
    "#;

    let store = InMemoryMemberStore::aus_toml(inhalt).expect("TOML sollte gueltig sein");
    assert_eq!(store.anzahl().await, 2);

    let cato = store.finde_nach_name("Cato").await.unwrap().unwrap();
    assert!(cato.aktiv, "aktiv ist standardmaessig true");

    let marneus = store.finde_nach_name("Marneus").await.unwrap().unwrap();
    assert!(!marneus.aktiv);
    assert_eq!(marneus.rang, "Chapter Master");
}

#[test]
fn toml_mit_doppeltem_namen_abgelehnt() {
    let inhalt = r#"
        [[mitglied]]
        name = "Cato"
        passwort_hash = "a"
        rang = "sergeant"

        [[mitglied]]
        name = "Cato"
        passwort_hash = "b"
        rang = "captain"
    "#;
    let ergebnis = InMemoryMemberStore::aus_toml(inhalt);
    assert!(matches!(ergebnis, Err(DbError::NameVergeben(_))));
}

#[test]
fn kaputtes_toml_abgelehnt() {
    let ergebnis = InMemoryMemberStore::aus_toml("[[mitglied]]\nname = ");
    assert!(matches!(ergebnis, Err(DbError::MitgliederDatei(_))));
}

#[test]
fn leere_datei_ergibt_leeren_store() {
    let store = InMemoryMemberStore::aus_toml("").unwrap();
    let anzahl = tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(store.anzahl());
    assert_eq!(anzahl, 0);
}
