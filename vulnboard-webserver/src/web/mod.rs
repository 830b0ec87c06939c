use std::net::IpAddr;

use rocket::{config::Config as RocketCfg, Rocket, Route};

mod frontend;
mod sqlite;

#[cfg(test)]
pub mod tests;

#[derive(Debug, Clone)]
pub struct Cfg {
    pub address: IpAddr,
    pub port: u16,
    pub workers: usize,
    pub enable_lab_probes: bool,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: sqlite::Connections,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
    } = options;

    if cfg.enable_lab_probes {
        warn!("Lab probes are enabled: debug details will be embedded into every page");
    }

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let mut instance = r.manage(db).manage(cfg);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/", frontend::routes())]
}

fn rocket_cfg(cfg: &Cfg) -> RocketCfg {
    RocketCfg {
        address: cfg.address,
        port: cfg.port,
        workers: cfg.workers,
        ..RocketCfg::default()
    }
}

pub async fn run(db: sqlite::Connections, cfg: Cfg) {
    info!("Listening on http://{}:{}", cfg.address, cfg.port);
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: Some(rocket_cfg(&cfg)),
        cfg,
    };
    let instance = rocket_instance(options, db);
    if let Err(err) = instance.launch().await {
        error!("Unable to run web server: {err}");
    }
}
