use bevy::prelude::*;

use crate::common::session::GameSession;
use crate::common::tunables::Tunables;
use crate::content::powers::{PowerCatalog, PowerKind};
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
    assert_eq!(app.world().resource::<PowerCatalog>().len(), 4);
    assert_eq!(app.world().resource::<GameSession>(), &GameSession::new(3));
}

#[test]
fn keeps_pre_inserted_catalogs() {
    let mut app = App::new();
    let reduced = PowerCatalog::from_definitions(
        PowerCatalog::default()
            .get(PowerKind::Fireball)
            .cloned(),
    );
    app.insert_resource(reduced);
    core::plugin(&mut app);
    assert_eq!(app.world().resource::<PowerCatalog>().len(), 1);
}
