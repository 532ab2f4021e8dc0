use anyhow::Result;
use fs_kit::{Filesystem, LocalFS, PosixPermissions};

fn main() -> Result<()> {
    let fs = LocalFS::new();

    let root = std::env::temp_dir().join("fs_kit_demo");
    println!("Working under: {}", root.display());

    // leftovers from a previous run
    if fs.exists(&root) {
        fs.rm_dir_all(&root)?;
    }

    // creates `docs` and every missing ancestor, group/others read-only
    fs.mkdir_with(root.join("docs"), PosixPermissions::new(7, 5, 5)?)?;

    fs.write(root.join("docs/first.txt"), b"Hello")?;
    fs.write(root.join("second.txt"), b"World")?;
    assert!(fs.is_file(root.join("docs/first.txt")));
    assert!(fs.exists(root.join("second.txt")));

    let first = fs.read(root.join("docs/first.txt"))?;
    let second = fs.read(root.join("second.txt"))?;
    println!(
        "{}, {}!",
        String::from_utf8(first)?,
        String::from_utf8(second)?
    );

    // a module is any file evaluated against caller-supplied bindings
    fs.write(root.join("greeting.txt"), b"Hello, {{name}}!")?;
    let value = fs.load_module(
        root.join("greeting.txt"),
        &[("name".to_string(), "fs-kit".into())].into_iter().collect(),
    )?;
    println!("module produced: {value}");

    // removes the whole subtree, children before parents
    fs.rm_dir_all(&root)?;
    assert!(fs.does_not_exist(&root));

    Ok(())
}
