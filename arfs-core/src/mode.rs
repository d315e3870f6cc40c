use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// Unix permission and file type bits as stored in a member header.
    ///
    /// Built with `from_bits_retain` so bits outside the named set survive
    /// round trips; foreign archives store all sorts of modes.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Mode: u32 {
        const PERM = 0o007777;
        const KIND = 0o170000;

        const FILE = 0o100000;
        const SYMLINK = 0o120000;
        const DIRECTORY = 0o040000;

        const SETUID = 0o4000;
        const SETGID = 0o2000;
        const STICKY = 0o1000;

        const USER_READ = 0o400;
        const USER_WRITE = 0o200;
        const USER_EXEC = 0o100;
        const GROUP_READ = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC = 0o010;
        const OTHER_READ = 0o004;
        const OTHER_WRITE = 0o002;
        const OTHER_EXEC = 0o001;
    }
}

impl Mode {
    /// File type bits alone.
    pub fn kind(self) -> Mode {
        self & Mode::KIND
    }

    /// Permission bits alone.
    pub fn perm(self) -> Mode {
        self & Mode::PERM
    }

    pub fn is_file(self) -> bool {
        self.kind() == Mode::FILE
    }

    pub fn is_symlink(self) -> bool {
        self.kind() == Mode::SYMLINK
    }

    pub fn is_dir(self) -> bool {
        self.kind() == Mode::DIRECTORY
    }
}

/// `ls`-style rendering, `-rw-r--r--`.
impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_file() {
            '-'
        } else if self.is_dir() {
            'd'
        } else if self.is_symlink() {
            'l'
        } else {
            '?'
        };
        write!(f, "{}", kind)?;
        for (read, write, exec) in [
            (Mode::USER_READ, Mode::USER_WRITE, Mode::USER_EXEC),
            (Mode::GROUP_READ, Mode::GROUP_WRITE, Mode::GROUP_EXEC),
            (Mode::OTHER_READ, Mode::OTHER_WRITE, Mode::OTHER_EXEC),
        ] {
            write!(f, "{}", if self.contains(read) { 'r' } else { '-' })?;
            write!(f, "{}", if self.contains(write) { 'w' } else { '-' })?;
            write!(f, "{}", if self.contains(exec) { 'x' } else { '-' })?;
        }
        Ok(())
    }
}
