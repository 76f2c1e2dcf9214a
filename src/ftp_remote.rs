use std::{
    io::{self, Read, Write},
    net::{SocketAddr, TcpStream, ToSocketAddrs},
    time::Duration,
};

use crate::{
    config::Settings,
    error::{ConnectionError, ListingError, TransferError},
    remote::{Connector, RemoteArchive},
};
use suppaftp::{types::FileType, FtpError, FtpStream};

/// Opens anonymous sessions on an FTP server.
#[derive(Debug, Clone)]
pub struct FtpConnector {
    host: String,
    port: u16,
    directory: String,
    user: String,
    password: String,
    timeout: Option<Duration>,
}

impl FtpConnector {
    pub fn new(settings: &Settings) -> Self {
        FtpConnector {
            host: settings.host.clone(),
            port: settings.port,
            directory: settings.remote_dir.clone(),
            user: settings.user.clone(),
            password: settings.password.clone(),
            timeout: settings.timeout,
        }
    }

    fn open_stream(&self) -> Result<FtpStream, ConnectionError> {
        let transport = |reason: String| ConnectionError::Transport {
            host: self.host.clone(),
            reason,
        };

        let timeout = match self.timeout {
            Some(timeout) => timeout,
            None => {
                return FtpStream::connect((self.host.as_str(), self.port))
                    .map_err(|err| transport(err.to_string()))
            }
        };

        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|err| transport(err.to_string()))?
            .collect();

        let mut last_err = format!("no address found for {}", self.host);
        for addr in addrs {
            match FtpStream::connect_timeout(addr, timeout) {
                Ok(stream) => {
                    let tcp = stream.get_ref();
                    tcp.set_read_timeout(Some(timeout))
                        .and_then(|_| tcp.set_write_timeout(Some(timeout)))
                        .map_err(|err| transport(err.to_string()))?;
                    // The data connections carry the archive, they get the same limit.
                    return Ok(stream.passive_stream_builder(move |addr| {
                        open_data_stream(addr, timeout).map_err(FtpError::ConnectionError)
                    }));
                }
                Err(err) => {
                    log::debug!("Connection attempt to {} failed: {}", addr, err);
                    last_err = err.to_string();
                }
            }
        }

        Err(transport(last_err))
    }
}

impl Connector for FtpConnector {
    type Remote = FtpRemote;

    fn connect(&self) -> Result<FtpRemote, ConnectionError> {
        let mut stream = self.open_stream()?;

        stream
            .login(self.user.as_str(), self.password.as_str())
            .map_err(|err| ConnectionError::Login(err.to_string()))?;

        stream
            .transfer_type(FileType::Binary)
            .map_err(|err| ConnectionError::Login(err.to_string()))?;

        stream
            .cwd(self.directory.as_str())
            .map_err(|err| ConnectionError::Directory {
                dir: self.directory.clone(),
                reason: err.to_string(),
            })?;

        Ok(FtpRemote { stream })
    }

    fn describe(&self) -> String {
        format!("ftp://{}:{}/{}", self.host, self.port, self.directory)
    }
}

pub struct FtpRemote {
    stream: FtpStream,
}

impl RemoteArchive for FtpRemote {
    fn list_filenames(&mut self) -> Result<Vec<String>, ListingError> {
        let fnames = self
            .stream
            .nlst(None)
            .map_err(|err| ListingError(err.to_string()))?;

        // Some servers report full paths in NLST output.
        let fnames: Vec<String> = fnames
            .into_iter()
            .map(|path| match path.rfind('/') {
                Some(i) => String::from(&path[(i + 1)..]),
                None => path,
            })
            .collect();

        log::debug!("Remote files: {:?}", fnames);
        Ok(fnames)
    }

    fn retrieve_file(&mut self, name: &str, sink: &mut dyn Write) -> Result<u64, TransferError> {
        let mut local_err: Option<io::Error> = None;

        let res = self.stream.retr(name, |reader| {
            copy_tracking_sink(reader, &mut *sink).map_err(|failure| match failure {
                CopyFailure::Read(err) => FtpError::ConnectionError(err),
                CopyFailure::Write(err) => {
                    let msg = err.to_string();
                    local_err = Some(err);
                    FtpError::ConnectionError(io::Error::new(io::ErrorKind::Other, msg))
                }
            })
        });

        match (res, local_err) {
            (Ok(bytes), _) => Ok(bytes),
            (Err(_), Some(source)) => Err(TransferError::Sink(source)),
            (Err(FtpError::ConnectionError(err)), None) => Err(TransferError::Network(err)),
            (Err(err @ FtpError::UnexpectedResponse(_)), None) => {
                Err(TransferError::Rejected(err.to_string()))
            }
            (Err(err), None) => Err(TransferError::Protocol(err.to_string())),
        }
    }

    fn close(&mut self) -> Result<(), String> {
        self.stream.quit().map_err(|err| err.to_string())
    }
}

fn open_data_stream(addr: SocketAddr, timeout: Duration) -> io::Result<TcpStream> {
    let stream = TcpStream::connect_timeout(&addr, timeout)?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;
    Ok(stream)
}

enum CopyFailure {
    Read(io::Error),
    Write(io::Error),
}

/// Like `io::copy`, but remembers which side failed.
fn copy_tracking_sink(reader: &mut dyn Read, sink: &mut dyn Write) -> Result<u64, CopyFailure> {
    let mut buf = [0u8; 64 * 1024];
    let mut total: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(CopyFailure::Read(err)),
        };

        sink.write_all(&buf[..n]).map_err(CopyFailure::Write)?;
        total += n as u64;
    }

    sink.flush().map_err(CopyFailure::Write)?;
    Ok(total)
}
