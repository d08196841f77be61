use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, ZdirError};

/// Target ownership for the data file: `user`, `user:group`, or numeric ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSpec {
    user: String,
    group: Option<String>,
}

impl OwnerSpec {
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

impl FromStr for OwnerSpec {
    type Err = ZdirError;

    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (user, group) = match raw.split_once(':') {
            Some((user, group)) => (user.trim(), Some(group.trim())),
            None => (raw, None),
        };
        if user.is_empty() {
            return Err(ZdirError::Ownership(format!("missing user in '{raw}'")));
        }
        if group.is_some_and(str::is_empty) {
            return Err(ZdirError::Ownership(format!("missing group in '{raw}'")));
        }
        Ok(Self {
            user: user.to_string(),
            group: group.map(ToString::to_string),
        })
    }
}

#[cfg(unix)]
pub(crate) fn apply_owner(path: &Path, spec: &OwnerSpec) -> Result<()> {
    let uid = unix::resolve_uid(spec.user())?;
    let gid = spec.group().map(unix::resolve_gid).transpose()?;
    std::os::unix::fs::chown(path, Some(uid), gid)
        .map_err(|err| ZdirError::persistence(path, err))?;
    tracing::debug!(path = %path.display(), uid, gid = ?gid, "applied data file owner");
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn apply_owner(path: &Path, spec: &OwnerSpec) -> Result<()> {
    tracing::warn!(
        path = %path.display(),
        owner = spec.user(),
        "file ownership is not supported on this platform; ignoring owner"
    );
    Ok(())
}

#[cfg(unix)]
mod unix {
    use std::ffi::CString;
    use std::{io, mem, ptr};

    use crate::error::{Result, ZdirError};

    const INITIAL_BUFFER: usize = 1024;
    const MAX_BUFFER: usize = 1 << 20;

    fn c_name(kind: &str, name: &str) -> Result<CString> {
        CString::new(name)
            .map_err(|_| ZdirError::Ownership(format!("{kind} name contains NUL: {name:?}")))
    }

    fn lookup_failed(kind: &str, name: &str, code: libc::c_int) -> ZdirError {
        ZdirError::Ownership(format!(
            "cannot look up {kind} {name}: {}",
            io::Error::from_raw_os_error(code)
        ))
    }

    pub(super) fn resolve_uid(user: &str) -> Result<libc::uid_t> {
        if let Ok(uid) = user.parse::<libc::uid_t>() {
            return Ok(uid);
        }
        let name = c_name("user", user)?;
        let mut buffer: Vec<libc::c_char> = vec![0; INITIAL_BUFFER];
        loop {
            // SAFETY: all-zero is a valid `passwd`; it is only read after
            // getpwnam_r reports success.
            let mut record: libc::passwd = unsafe { mem::zeroed() };
            let mut found: *mut libc::passwd = ptr::null_mut();
            // SAFETY: every pointer refers to live storage owned by this frame
            // and `buffer.len()` is the true capacity of `buffer`.
            let code = unsafe {
                libc::getpwnam_r(
                    name.as_ptr(),
                    &mut record,
                    buffer.as_mut_ptr(),
                    buffer.len(),
                    &mut found,
                )
            };
            if code == libc::ERANGE && buffer.len() < MAX_BUFFER {
                buffer.resize(buffer.len() * 2, 0);
                continue;
            }
            if code != 0 {
                return Err(lookup_failed("user", user, code));
            }
            if found.is_null() {
                return Err(ZdirError::Ownership(format!("unknown user: {user}")));
            }
            return Ok(record.pw_uid);
        }
    }

    pub(super) fn resolve_gid(group: &str) -> Result<libc::gid_t> {
        if let Ok(gid) = group.parse::<libc::gid_t>() {
            return Ok(gid);
        }
        let name = c_name("group", group)?;
        let mut buffer: Vec<libc::c_char> = vec![0; INITIAL_BUFFER];
        loop {
            // SAFETY: see `resolve_uid`.
            let mut record: libc::group = unsafe { mem::zeroed() };
            let mut found: *mut libc::group = ptr::null_mut();
            // SAFETY: see `resolve_uid`.
            let code = unsafe {
                libc::getgrnam_r(
                    name.as_ptr(),
                    &mut record,
                    buffer.as_mut_ptr(),
                    buffer.len(),
                    &mut found,
                )
            };
            if code == libc::ERANGE && buffer.len() < MAX_BUFFER {
                buffer.resize(buffer.len() * 2, 0);
                continue;
            }
            if code != 0 {
                return Err(lookup_failed("group", group, code));
            }
            if found.is_null() {
                return Err(ZdirError::Ownership(format!("unknown group: {group}")));
            }
            return Ok(record.gr_gid);
        }
    }

}
