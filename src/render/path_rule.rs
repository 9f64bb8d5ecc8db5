/// Source of the `PathRule` value parser emitted into generated tools that
/// take path options. Field names match [`crate::translator::Flag::name`].
pub const PATH_RULE_SOURCE: &str = r#"/// Checks applied to a path option while the command line is parsed.
#[derive(Clone, Copy, Debug, Default)]
struct PathRule {
    exists: bool,
    file_okay: bool,
    dir_okay: bool,
    resolve_path: bool,
    readable: bool,
    writable: bool,
}

impl PathRule {
    fn check(&self, raw: &str) -> Result<PathBuf, String> {
        let mut path = PathBuf::from(raw);
        if self.resolve_path {
            path = if path.exists() {
                std::fs::canonicalize(&path).map_err(|e| format!("{}: {}", raw, e))?
            } else {
                std::env::current_dir()
                    .map_err(|e| format!("{}: {}", raw, e))?
                    .join(path)
            };
        }

        if !path.exists() {
            if self.exists {
                return Err(format!("{} does not exist", path.display()));
            }
            return Ok(path);
        }
        if path.is_file() && !self.file_okay {
            return Err(format!("{} is a file", path.display()));
        }
        if path.is_dir() && !self.dir_okay {
            return Err(format!("{} is a directory", path.display()));
        }
        if self.readable {
            let readable = if path.is_dir() {
                std::fs::read_dir(&path).map(|_| ())
            } else {
                std::fs::File::open(&path).map(|_| ())
            };
            readable.map_err(|e| format!("{} is not readable: {}", path.display(), e))?;
        }
        if self.writable {
            let metadata = std::fs::metadata(&path).map_err(|e| format!("{}: {}", raw, e))?;
            if metadata.permissions().readonly() {
                return Err(format!("{} is not writable", path.display()));
            }
        }
        Ok(path)
    }
}

impl clap::builder::TypedValueParser for PathRule {
    type Value = PathBuf;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<PathBuf, clap::Error> {
        let raw = value
            .to_str()
            .ok_or_else(|| clap::Error::new(clap::error::ErrorKind::InvalidUtf8).with_cmd(cmd))?;
        self.check(raw).map_err(|msg| {
            let name = arg
                .and_then(|a| a.get_long())
                .map(str::to_string)
                .or_else(|| arg.map(|a| a.get_id().to_string()))
                .unwrap_or_default();
            clap::Error::raw(
                clap::error::ErrorKind::ValueValidation,
                format!("invalid value for --{}: {}\n", name, msg),
            )
            .with_cmd(cmd)
        })
    }
}
"#;
