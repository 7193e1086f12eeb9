use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use travellers_server::config::{AppState, Config};
use travellers_server::server;

pub struct TestServer {
    addr: SocketAddr,
    shutdown: Arc<Notify>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    /// Serve the built-in explorers on an ephemeral port
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Serve with a tweaked configuration; the dataset follows `config.dataset`
    pub async fn spawn_with(configure: impl FnOnce(&mut Config)) -> Self {
        let mut config = Config::load_from("tests/support/no-such-config").expect("default config");
        config.logging.access_log = false;
        config.performance.read_timeout = 2;
        config.performance.write_timeout = 2;
        configure(&mut config);

        let state = Arc::new(AppState::from_config(config).expect("app state"));
        let listener =
            server::create_listener("127.0.0.1:0".parse().unwrap()).expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let shutdown = Arc::new(Notify::new());
        let handle = tokio::spawn(server::serve(listener, state, Arc::clone(&shutdown)));

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }

    /// Request shutdown and wait for the server task to finish
    pub async fn stop(self) {
        self.shutdown.notify_one();
        self.handle
            .await
            .expect("server task panicked")
            .expect("server returned an error");
    }
}
