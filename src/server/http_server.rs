use may::coroutine::JoinHandle;
use may_minihttp::{HttpServerWithHeaders, HttpService};
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;
use tracing::info;

/// Wrapper around may_minihttp's HTTP server (32 header slots).
pub struct HttpServer<T>(pub T);

/// Handle to a running HTTP server
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the server was bound to
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Poll the listener until it accepts a TCP connection.
    ///
    /// # Errors
    ///
    /// `TimedOut` if the server does not accept within ~250ms.
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Cancel the server coroutine and wait for it to finish.
    pub fn stop(self) {
        // SAFETY: cancelling a coroutine we own; the handle is joined right after.
        unsafe {
            self.handle.coroutine().cancel();
        }
        let _ = self.handle.join();
        info!(addr = %self.addr, "Server stopped");
    }

    /// Block until the server coroutine completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the server coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Bind and start serving.
    ///
    /// # Errors
    ///
    /// Fails if the address does not resolve or cannot be bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        let handle = HttpServerWithHeaders::<_, 32>(self.0).start(addr)?;
        info!(addr = %addr, "Server listening");
        Ok(ServerHandle { addr, handle })
    }
}
