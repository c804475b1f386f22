//! Test fixtures: a temp directory holding fake Graphviz executables.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use dotpipe_backend::{Graphviz, ToolchainConfig};

/// Version line printed by the fake `dot -V`.
pub const FAKE_VERSION_LINE: &str = "dot - graphviz version 2.43.0 (0)";

/// A `dot` stand-in.
///
/// - `-V` prints [`FAKE_VERSION_LINE`] to stderr.
/// - With an input file it writes `rendered <format token>` followed by the
///   input to `-o<path>`, or to the `-O` name (`<input>.<formatter>.<renderer>.<format>`).
/// - Without an input file it copies stdin to stdout.
const DOT_SCRIPT: &str = r#"#!/bin/sh
fmt=""
out=""
auto=""
input=""
for arg in "$@"; do
  case "$arg" in
    -V) echo "dot - graphviz version 2.43.0 (0)" >&2; exit 0 ;;
    -T*) fmt="${arg#-T}" ;;
    -O) auto=1 ;;
    -o*) out="${arg#-o}" ;;
    -*) ;;
    *) input="$arg" ;;
  esac
done
if [ -z "$input" ]; then
  exec cat
fi
if [ ! -f "$input" ]; then
  echo "Error: dot: can't open $input" >&2
  exit 2
fi
if [ -n "$auto" ]; then
  suffix=$(echo "$fmt" | awk -F: '{ s = $NF; for (i = NF - 1; i > 0; i--) s = s "." $i; print s }')
  out="$input.$suffix"
fi
{ echo "rendered $fmt"; cat "$input"; } > "$out"
"#;

/// An `unflatten` stand-in: echoes its arguments as a comment, then stdin.
const UNFLATTEN_SCRIPT: &str = r#"#!/bin/sh
echo "// unflatten $*"
exec cat
"#;

/// A fixture directory with fake executables and graph files.
pub struct FakeToolchain {
    pub root: TempDir,
    pub bin_dir: PathBuf,
    pub work_dir: PathBuf,
}

impl FakeToolchain {
    /// Create a fixture with the standard `dot` and `unflatten` scripts.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let bin_dir = root.path().join("bin");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");
        fs::create_dir_all(&work_dir).expect("Failed to create work dir");

        let fixture = Self {
            root,
            bin_dir,
            work_dir,
        };
        fixture.add_script("dot", DOT_SCRIPT);
        fixture.add_script("unflatten", UNFLATTEN_SCRIPT);
        fixture
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of the standard fake `dot`.
    pub fn dot(&self) -> PathBuf {
        self.bin_dir.join("dot")
    }

    /// Path of the standard fake `unflatten`.
    pub fn unflatten(&self) -> PathBuf {
        self.bin_dir.join("unflatten")
    }

    /// Write an executable shell script into the bin directory.
    pub fn add_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.bin_dir.join(name);
        fs::write(&path, body).expect("Failed to write script");
        let mut perms = fs::metadata(&path)
            .expect("Failed to stat script")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to chmod script");
        path
    }

    /// A `dot` that drains stdin, prints `message` to stderr and exits with `code`.
    pub fn failing_dot(&self, code: i32, message: &str) -> PathBuf {
        let body = format!(
            "#!/bin/sh\ncat > /dev/null\nprintf '%s' '{}' >&2\nexit {}\n",
            message.replace('\'', r"'\''"),
            code
        );
        self.add_script("failing-dot", &body)
    }

    /// A `dot` script without execute permission.
    pub fn non_executable_dot(&self) -> PathBuf {
        let path = self.add_script("noexec-dot", "#!/bin/sh\nexec cat\n");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644))
            .expect("Failed to chmod script");
        path
    }

    /// A `dot` whose stdout is not valid UTF-8.
    pub fn garbage_dot(&self) -> PathBuf {
        self.add_script(
            "garbage-dot",
            "#!/bin/sh\ncat > /dev/null\nprintf 'ok \\377\\376'\n",
        )
    }

    /// A `dot` that reads one line and exits without draining the rest.
    pub fn early_exit_dot(&self) -> PathBuf {
        self.add_script("early-exit-dot", "#!/bin/sh\nhead -n 1\n")
    }

    /// A `dot` whose `-V` prints `line` to stderr.
    pub fn versioned_dot(&self, line: &str) -> PathBuf {
        let body = format!(
            "#!/bin/sh\nprintf '%s\\n' '{}' >&2\n",
            line.replace('\'', r"'\''")
        );
        self.add_script("versioned-dot", &body)
    }

    /// Write a graph file into the work directory.
    pub fn write_graph(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, content).expect("Failed to write graph file");
        path
    }

    /// A backend wired to the standard fake executables.
    pub fn graphviz(&self) -> Graphviz {
        self.graphviz_with_dot(self.dot())
    }

    /// A backend using `dot` as its layout executable.
    pub fn graphviz_with_dot(&self, dot: impl Into<PathBuf>) -> Graphviz {
        Graphviz::with_config(
            ToolchainConfig::default()
                .dot_binary(dot)
                .unflatten_binary(self.unflatten())
                .quiet(true),
        )
    }
}

impl Default for FakeToolchain {
    fn default() -> Self {
        Self::new()
    }
}

/// A small undirected graph.
pub const SIMPLE_GRAPH: &str = "graph {\n  a -- b\n  b -- c\n}\n";
