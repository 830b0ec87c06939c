use std::net::Ipv4Addr;

use rocket::{config::Config as RocketCfg, local::blocking::Client, Route};

use crate::web::{sqlite, Cfg};

pub mod prelude {
    pub use rocket::{
        http::{ContentType, Status},
        local::blocking::Client,
    };

    pub use vulnboard_core::repositories::CommentRepository;
}

pub fn default_test_cfg() -> Cfg {
    Cfg {
        address: Ipv4Addr::LOCALHOST.into(),
        port: 0,
        workers: 1,
        enable_lab_probes: true,
    }
}

pub fn rocket_test_setup(mounts: Vec<(&'static str, Vec<Route>)>) -> (Client, sqlite::Connections) {
    rocket_test_setup_with_cfg(mounts, default_test_cfg())
}

pub fn rocket_test_setup_with_cfg(
    mounts: Vec<(&'static str, Vec<Route>)>,
    cfg: Cfg,
) -> (Client, sqlite::Connections) {
    let connections = vulnboard_db_sqlite::Connections::init(":memory:", 1).unwrap();
    let db = sqlite::Connections::from(connections);
    let options = super::InstanceOptions {
        mounts,
        rocket_cfg: Some(RocketCfg::debug_default()),
        cfg,
    };
    let rocket = super::rocket_instance(options, db.clone());
    let client = Client::tracked(rocket).unwrap();
    (client, db)
}

#[test]
fn mount_board_at_root() {
    let (client, _db) = rocket_test_setup(super::mounts());
    let res = client.get("/").dispatch();
    assert_eq!(res.status(), prelude::Status::Ok);
}

#[test]
fn build_rocket_cfg_from_cfg() {
    let cfg = Cfg {
        port: 8123,
        workers: 3,
        ..default_test_cfg()
    };
    let rocket_cfg = super::rocket_cfg(&cfg);
    assert_eq!(rocket_cfg.port, 8123);
    assert_eq!(rocket_cfg.workers, 3);
    assert_eq!(rocket_cfg.address, cfg.address);
}
