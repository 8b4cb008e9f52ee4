use crate::{Error, Result};
use std::path::{Component, Path};

const PARENT: &str = "..";

/// A path reduced to its root (prefix and/or root dir) plus normalized segments.
///
/// `.` segments are dropped and `a/..` pairs collapse. Leading `..` segments are kept for relative
/// paths and discarded at the root of absolute ones.
#[derive(Debug, PartialEq, Eq)]
struct LexicalPath<'a> {
    root: Vec<Component<'a>>,
    segments: Vec<&'a str>,
}

impl<'a> LexicalPath<'a> {
    fn parse(path: &'a Path) -> Result<Self> {
        let display = || path.display().to_string();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidPath {
                path: display(),
                reason: "path is empty",
            });
        }

        let mut root = Vec::new();
        let mut segments: Vec<&'a str> = Vec::new();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => root.push(component),
                Component::CurDir => {}
                Component::ParentDir => match segments.last() {
                    Some(&last) if last != PARENT => {
                        segments.pop();
                    }
                    _ if root.is_empty() => segments.push(PARENT),
                    _ => {}
                },
                Component::Normal(name) => {
                    let Some(name) = name.to_str() else {
                        return Err(Error::InvalidPath {
                            path: display(),
                            reason: "path is not valid UTF-8",
                        });
                    };
                    segments.push(name);
                }
            }
        }

        Ok(Self { root, segments })
    }
}

/// Computes the `/`-separated path that leads from the directory containing `page_path` to
/// `image_path`.
///
/// This is purely lexical: neither path is touched on disk and symlinks are not resolved.
pub(crate) fn relative_from_page(page_path: &Path, image_path: &Path) -> Result<String> {
    let page = LexicalPath::parse(page_path)?;
    let image = LexicalPath::parse(image_path)?;

    if page.root != image.root {
        return Err(Error::InvalidPath {
            path: image_path.display().to_string(),
            reason: "page and image paths do not share a common root",
        });
    }

    let Some((_, page_dir)) = page.segments.split_last().filter(|(file, _)| **file != PARENT) else {
        return Err(Error::InvalidPath {
            path: page_path.display().to_string(),
            reason: "page path does not name a file",
        });
    };

    let common = page_dir
        .iter()
        .zip(image.segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    // Climbing out of a directory we only know as `..` would require the working directory.
    if page_dir[common..].contains(&PARENT) {
        return Err(Error::InvalidPath {
            path: page_path.display().to_string(),
            reason: "page directory lies outside the image path's known ancestors",
        });
    }

    let ups = page_dir.len() - common;
    let mut out: Vec<&str> = Vec::with_capacity(ups + image.segments.len() - common);
    out.extend(std::iter::repeat_n(PARENT, ups));
    out.extend_from_slice(&image.segments[common..]);

    if out.is_empty() {
        return Err(Error::InvalidPath {
            path: image_path.display().to_string(),
            reason: "image path points at the page directory itself",
        });
    }

    Ok(out.join("/"))
}
