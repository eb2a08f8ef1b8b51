//! TCP listener whose accepted connections can be cut from outside.
//!
//! Graceful shutdown waits for every connection to finish its response, and
//! a client that stops reading never lets that happen. Once cut, every
//! socket fails its next read or write, so hyper drops the connection.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::serve::Listener;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;

pub struct ClosingListener {
    inner: TcpListener,
    cut: watch::Receiver<bool>,
}

/// Cuts every connection accepted through the paired listener
pub struct ConnectionCutter {
    cut: watch::Sender<bool>,
}

impl ClosingListener {
    pub fn new(inner: TcpListener) -> (Self, ConnectionCutter) {
        let (cut_tx, cut_rx) = watch::channel(false);
        (
            Self {
                inner,
                cut: cut_rx,
            },
            ConnectionCutter { cut: cut_tx },
        )
    }
}

impl ConnectionCutter {
    pub fn cut(&self) {
        self.cut.send_replace(true);
    }
}

impl Listener for ClosingListener {
    type Io = ClosingStream;
    type Addr = SocketAddr;

    async fn accept(&mut self) -> (Self::Io, Self::Addr) {
        let (stream, addr) = Listener::accept(&mut self.inner).await;
        (ClosingStream::new(stream, self.cut.clone()), addr)
    }

    fn local_addr(&self) -> io::Result<Self::Addr> {
        self.inner.local_addr()
    }
}

pub struct ClosingStream {
    inner: TcpStream,
    cut_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
    cut: bool,
}

impl ClosingStream {
    fn new(inner: TcpStream, mut cut: watch::Receiver<bool>) -> Self {
        Self {
            inner,
            // Also resolves if the cutter is dropped
            cut_signal: Box::pin(async move {
                let _ = cut.wait_for(|cut| *cut).await;
            }),
            cut: false,
        }
    }

    /// Registers the task for wake-up on cut; true once cut.
    fn poll_cut(&mut self, cx: &mut Context<'_>) -> bool {
        if !self.cut && self.cut_signal.as_mut().poll(cx).is_ready() {
            self.cut = true;
        }
        self.cut
    }
}

fn cut_error() -> io::Error {
    io::Error::new(
        io::ErrorKind::ConnectionAborted,
        "connection closed by server shutdown",
    )
}

impl AsyncRead for ClosingStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.poll_cut(cx) {
            return Poll::Ready(Err(cut_error()));
        }
        Pin::new(&mut this.inner).poll_read(cx, buf)
    }
}

impl AsyncWrite for ClosingStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if this.poll_cut(cx) {
            return Poll::Ready(Err(cut_error()));
        }
        Pin::new(&mut this.inner).poll_write(cx, buf)
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if this.poll_cut(cx) {
            return Poll::Ready(Err(cut_error()));
        }
        Pin::new(&mut this.inner).poll_write_vectored(cx, bufs)
    }

    fn is_write_vectored(&self) -> bool {
        self.inner.is_write_vectored()
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.poll_cut(cx) {
            return Poll::Ready(Err(cut_error()));
        }
        Pin::new(&mut this.inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.poll_cut(cx) {
            return Poll::Ready(Ok(()));
        }
        Pin::new(&mut this.inner).poll_shutdown(cx)
    }
}
