use std::{
    ffi::OsString,
    path::{Component, Path, PathBuf},
};

/// Where the submission for `input` goes when no output path is given: an
/// `input` directory becomes `output` and `.in.` in the file name becomes
/// `.out.`. Never returns `input` itself.
pub fn output_path_for(input: &Path) -> PathBuf {
    let directory = input
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|component| match component {
                    Component::Normal(name) if name == "input" => {
                        Component::Normal("output".as_ref())
                    }
                    other => other,
                })
                .collect::<PathBuf>()
        })
        .unwrap_or_default();

    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().replace(".in.", ".out."))
        .unwrap_or_else(|| String::from("submission.out.txt"));

    let output = directory.join(&file_name);
    if output == input {
        let mut file_name = OsString::from(file_name);
        file_name.push(".out");
        return directory.join(file_name);
    }

    output
}

/// Creates the parent directory of `path` when it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<(), std::io::Error> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("data/input/a.in.txt")),
            PathBuf::from("data/output/a.out.txt")
        );
        assert_eq!(
            output_path_for(Path::new("b.in.txt")),
            PathBuf::from("b.out.txt")
        );
        assert_eq!(
            output_path_for(Path::new("/tmp/inputs/c.in.txt")),
            PathBuf::from("/tmp/inputs/c.out.txt")
        );
    }

    #[test]
    fn test_output_path_never_overwrites_input() {
        assert_eq!(
            output_path_for(Path::new("data/d.txt")),
            PathBuf::from("data/d.txt.out")
        );
    }
}
