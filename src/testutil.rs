//! Shared test fixtures.

use std::fs;
use std::path::{Path, PathBuf};

/// A small Big-O quiz. `data-structure-operations` draws its choices from
/// its answers, `sorting-algorithms` uses default choices and gets a
/// reverse section.
pub const BIGO_JSON: &str = r#"{
    "id": "bigo",
    "title": "Big-O Notation",
    "link": "http://bigocheatsheet.com/",
    "sections": [
        {
            "id": "data-structure-operations",
            "title": "Data Structure Operations",
            "answers_as_choices": true,
            "sub_sections": [
                {
                    "id": "array",
                    "title": "Array",
                    "questions": [
                        {"id": "array-access-average", "text": "Access (Average)", "answer": "O(1)"},
                        {"id": "array-search-worst", "text": "Search (Worst)", "answer": "O(n)"},
                        {"id": "array-insertion-worst", "text": "Insertion (Worst)", "answer": "O(n)"}
                    ]
                },
                {
                    "id": "b-tree",
                    "title": "B-Tree",
                    "questions": [
                        {"id": "b-tree-search-worst", "text": "Search (Worst)", "answer": "O(log(n))"},
                        {"id": "b-tree-insertion-average", "text": "Insertion (Average)", "answer": "O(log(n))"}
                    ]
                },
                {
                    "id": "hash-table",
                    "title": "Hash Table",
                    "questions": [
                        {"id": "hash-table-search-average", "text": "Search (Average)", "answer": "O(1)"},
                        {"id": "hash-table-search-worst", "text": "Search (Worst)", "answer": "O(n)"}
                    ]
                }
            ]
        },
        {
            "id": "sorting-algorithms",
            "title": "Sorting Algorithms",
            "link": "http://bigocheatsheet.com/#sorting",
            "and_reverse": true,
            "default_choices": ["O(n)", "O(n log(n))", {"text": "O(n^2)", "html": "O(n<sup>2</sup>)"}],
            "questions": [
                {"id": "quicksort-worst", "text": "Quicksort (Worst)", "answer": {"text": "O(n^2)", "html": "O(n<sup>2</sup>)"}},
                {"id": "mergesort-worst", "text": "Mergesort (Worst)", "answer": "O(n log(n))"},
                {"id": "bubble-sort-best", "text": "Bubble Sort (Best)", "answer": "O(n)"}
            ]
        }
    ]
}"#;

/// Write `contents` to `dir/file_name` and return the file's path.
pub fn write_file(dir: &Path, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, contents).unwrap();
    path
}
