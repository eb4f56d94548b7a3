use criterion::{black_box, criterion_group, criterion_main, Criterion};

use codegraph_core::config::Config;
use codegraph_core::hash::node_id;
use codegraph_core::sqlite::SqliteGraphStore;
use codegraph_core::types::NodeKind;
use codegraph_index::pipeline::{self, CancellationToken};
use codegraph_lang::registry::LanguageTag;
use codegraph_lang::treesitter::TreeSitterParser;
use std::path::Path;

// ---------------------------------------------------------------------------
// Node-id hashing
// ---------------------------------------------------------------------------

fn bench_node_id(c: &mut Criterion) {
    c.bench_function("node_id_short_name", |b| {
        b.iter(|| node_id(black_box(NodeKind::Function), black_box("a.py#foo")))
    });

    let long_name = format!("src/services/payments/handlers.py#{}", "Owner.".repeat(20));
    c.bench_function("node_id_deep_qualified_name", |b| {
        b.iter(|| node_id(black_box(NodeKind::Function), black_box(&long_name)))
    });
}

// ---------------------------------------------------------------------------
// Tree-sitter parsing
// ---------------------------------------------------------------------------

const PYTHON_SOURCE: &str = r#"
import os
from .models import User, Account

class UserService:
    def __init__(self, db):
        self.db = db

    def find_user(self, user_id):
        row = self.db.query(user_id)
        return User(row)

    def find_account(self, user):
        return Account.for_user(user)

def main():
    service = UserService(os.environ)
    user = service.find_user(1)
    print(user)
"#;

const GO_SOURCE: &str = r#"
package main

import (
	"fmt"
	"time"
)

type Address struct {
	City string
}

type User struct {
	Address
	Name string
}

func (u *User) SetAddress(a *Address) {
	u.Address = *a
}

func NewUser(name string) *User {
	fmt.Println(name, time.Now())
	return &User{Name: name}
}
"#;

fn bench_parse_python(c: &mut Criterion) {
    c.bench_function("parse_python_module", |b| {
        b.iter(|| {
            let mut parser = TreeSitterParser::new();
            parser
                .parse_file(LanguageTag::Python, Path::new("service.py"), black_box(PYTHON_SOURCE))
                .unwrap()
        })
    });
}

fn bench_parse_go(c: &mut Criterion) {
    c.bench_function("parse_go_module", |b| {
        b.iter(|| {
            let mut parser = TreeSitterParser::new();
            parser
                .parse_file(LanguageTag::Go, Path::new("main.go"), black_box(GO_SOURCE))
                .unwrap()
        })
    });
}

// ---------------------------------------------------------------------------
// End-to-end pipeline
// ---------------------------------------------------------------------------

fn bench_index_small_repo(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("service.py"), PYTHON_SOURCE).unwrap();
    std::fs::write(dir.path().join("main.go"), GO_SOURCE).unwrap();

    c.bench_function("index_two_file_repo", |b| {
        b.iter(|| {
            let mut store = SqliteGraphStore::in_memory().unwrap();
            pipeline::run(
                black_box(dir.path()),
                &Config::default(),
                &mut store,
                &CancellationToken::new(),
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_node_id, bench_parse_python, bench_parse_go, bench_index_small_repo);
criterion_main!(benches);
