use std::panic::{self, AssertUnwindSafe};

use crate::{
    error::ConnectionError,
    remote::{Connector, RemoteArchive},
};

/// Open a session, hand it to `scope`, and close it exactly once afterwards.
///
/// The session is closed whether `scope` returns normally or panics; a panic is resumed
/// once the connection has been released. A failure to close is logged and otherwise
/// ignored, it never replaces the value produced by `scope`.
pub fn with_session<C, F, T>(connector: &C, scope: F) -> Result<T, ConnectionError>
where
    C: Connector,
    F: FnOnce(&mut C::Remote) -> T,
{
    let mut remote = connector.connect()?;
    log::debug!("Session opened: {}", connector.describe());

    let result = panic::catch_unwind(AssertUnwindSafe(|| scope(&mut remote)));

    match remote.close() {
        Ok(()) => log::info!("Connection to {} closed", connector.describe()),
        Err(err) => log::warn!("Error closing connection to {}: {}", connector.describe(), err),
    }

    match result {
        Ok(val) => Ok(val),
        Err(payload) => panic::resume_unwind(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ListingError, TransferError};
    use std::{cell::Cell, io::Write, rc::Rc};

    struct CountingRemote {
        closes: Rc<Cell<u32>>,
    }

    impl RemoteArchive for CountingRemote {
        fn list_filenames(&mut self) -> Result<Vec<String>, ListingError> {
            Ok(vec![])
        }

        fn retrieve_file(&mut self, _: &str, _: &mut dyn Write) -> Result<u64, TransferError> {
            Ok(0)
        }

        fn close(&mut self) -> Result<(), String> {
            self.closes.set(self.closes.get() + 1);
            Err("already gone".into())
        }
    }

    struct CountingConnector {
        closes: Rc<Cell<u32>>,
        refuse: bool,
    }

    impl Connector for CountingConnector {
        type Remote = CountingRemote;

        fn connect(&self) -> Result<CountingRemote, ConnectionError> {
            if self.refuse {
                return Err(ConnectionError::Login("530 go away".into()));
            }
            Ok(CountingRemote {
                closes: self.closes.clone(),
            })
        }

        fn describe(&self) -> String {
            "test".into()
        }
    }

    fn connector(refuse: bool) -> CountingConnector {
        CountingConnector {
            closes: Rc::new(Cell::new(0)),
            refuse,
        }
    }

    #[test]
    fn closes_once_after_scope() {
        let conn = connector(false);
        let out = with_session(&conn, |remote| remote.list_filenames().unwrap().len()).unwrap();
        assert_eq!(out, 0);
        assert_eq!(conn.closes.get(), 1);
    }

    #[test]
    fn closes_when_scope_fails() {
        let conn = connector(false);
        let out: Result<(), &str> = with_session(&conn, |_| Err("boom")).unwrap();
        assert!(out.is_err());
        assert_eq!(conn.closes.get(), 1);
    }

    #[test]
    fn closes_when_scope_panics() {
        let conn = connector(false);
        let caught = panic::catch_unwind(AssertUnwindSafe(|| {
            with_session(&conn, |_| -> () { panic!("scope blew up") })
        }));
        assert!(caught.is_err());
        assert_eq!(conn.closes.get(), 1);
    }

    #[test]
    fn failed_connect_runs_nothing() {
        let conn = connector(true);
        let mut ran = false;
        let res = with_session(&conn, |_| ran = true);
        assert!(matches!(res, Err(ConnectionError::Login(_))));
        assert!(!ran);
        assert_eq!(conn.closes.get(), 0);
    }
}
