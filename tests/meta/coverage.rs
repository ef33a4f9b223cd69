//! Checks that the unit test tree mirrors `src` and that every test file is compiled

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Test harness roots and module organization files
    fn is_structural(file_name: &str) -> bool {
        matches!(file_name, "main.rs" | "lib.rs" | "mod.rs")
    }

    fn file_name_of(relative: &str) -> &str {
        relative.rsplit('/').next().unwrap_or(relative)
    }

    fn mirror_paths() -> (HashSet<String>, HashSet<String>) {
        let src_dir = Path::new(SRC_DIR);
        let tests_dir = Path::new(UNIT_DIR);

        let src_paths = collect_relative_paths(src_dir, src_dir).unwrap_or_else(|error| {
            assert!(src_dir.exists(), "Failed to read src directory: {error}");
            HashSet::new()
        });
        let test_paths = if tests_dir.exists() {
            collect_relative_paths(tests_dir, tests_dir).unwrap_or_default()
        } else {
            HashSet::new()
        };
        (src_paths, test_paths)
    }

    // Tests every source module has a unit test file at the same relative path
    // Verified by removing a unit test file
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (src_paths, test_paths) = mirror_paths();

        let mut missing_tests: Vec<&String> = src_paths
            .iter()
            .filter(|path| !is_structural(file_name_of(path)))
            .filter(|path| !test_paths.contains(*path))
            .collect();
        missing_tests.sort();

        assert!(
            missing_tests.is_empty(),
            "The following src files/directories are missing unit test counterparts:\n{}",
            missing_tests
                .iter()
                .map(|src_path| format!("  - src/{src_path} -> tests/unit/{src_path}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    // Tests no unit test file outlives the module it covers
    // Verified by adding a unit test file for a non-existent module
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (src_paths, test_paths) = mirror_paths();

        let mut orphaned_tests: Vec<&String> = test_paths
            .iter()
            .filter(|path| !is_structural(file_name_of(path)))
            .filter(|path| !src_paths.contains(*path))
            .collect();
        orphaned_tests.sort();

        assert!(
            orphaned_tests.is_empty(),
            "The following unit test files/directories have no corresponding src files:\n{}",
            orphaned_tests
                .iter()
                .map(|test_path| format!("  - tests/unit/{test_path} -> src/{test_path} (missing)"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    // Tests every unit test file is declared by its parent module, so it is compiled
    // Verified by deleting a `pub mod` line from a unit test mod.rs
    #[test]
    fn test_all_unit_tests_are_declared() {
        let (_, test_paths) = mirror_paths();
        let tests_dir = Path::new(UNIT_DIR);
        let mut undeclared = Vec::new();

        for test_path in &test_paths {
            let path = tests_dir.join(test_path);
            let file_name = file_name_of(test_path);
            if is_structural(file_name) {
                continue;
            }
            let Some(module) = file_name.strip_suffix(".rs").or_else(|| {
                path.is_dir().then_some(file_name)
            }) else {
                continue;
            };

            let Some(parent) = path.parent() else {
                continue;
            };
            let declaring = if parent == tests_dir {
                parent.join("main.rs")
            } else {
                parent.join("mod.rs")
            };
            let content = fs::read_to_string(&declaring).unwrap_or_default();
            let declared = content.lines().any(|line| {
                let line = line.trim();
                line == format!("mod {module};") || line == format!("pub mod {module};")
            });
            if !declared {
                undeclared.push(format!("  - tests/unit/{test_path} (not in {})", declaring.display()));
            }
        }
        undeclared.sort();

        assert!(
            undeclared.is_empty(),
            "The following unit test modules are never compiled:\n{}",
            undeclared.join("\n")
        );
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> Result<HashSet<String>, io::Error> {
        let mut paths = HashSet::new();

        if dir.is_dir() {
            let entries = fs::read_dir(dir)?;

            for entry_result in entries {
                let entry = entry_result?;
                let path = entry.path();

                let relative_path = match path.strip_prefix(base) {
                    Ok(stripped) => stripped.to_string_lossy().replace('\\', "/"),
                    Err(_original_error) => {
                        return Err(io::Error::other("Failed to strip prefix"));
                    }
                };

                if path.is_dir() {
                    paths.insert(relative_path.clone());

                    let sub_paths = collect_relative_paths(&path, base)?;
                    paths.extend(sub_paths);
                } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                    paths.insert(relative_path);
                }
            }
        }

        Ok(paths)
    }

    // Tests every non-structural test file contains at least one test
    // Verified by adding a test file with only helper functions
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let mut files_without_tests = Vec::new();

        let result = check_test_files(tests_dir, &mut files_without_tests);
        if let Err(error) = result {
            assert!(
                tests_dir.exists(),
                "Failed to scan tests directory: {error}"
            );
        }

        assert!(
            files_without_tests.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            files_without_tests.join("\n")
        );
    }

    fn check_test_files(dir: &Path, files_without_tests: &mut Vec<String>) -> Result<(), io::Error> {
        let entries = fs::read_dir(dir)?;

        for entry_result in entries {
            let entry = entry_result?;
            let path = entry.path();

            if path.is_dir() {
                check_test_files(&path, files_without_tests)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                    continue;
                };

                if is_structural(file_name) {
                    continue;
                }

                let content = fs::read_to_string(&path)?;

                if !content.contains("#[test]") {
                    files_without_tests.push(format!("  - {}", path.display()));
                }
            }
        }

        Ok(())
    }
}
