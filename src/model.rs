// src/model.rs
use serde::Serialize;

/// Document 内のルーティングファイルを指すインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FileId(pub usize);

/// ルーティングファイルから抽出した 1 件のルート宣言
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRecord {
    /// ルートのパス (例: "home", "users/:id", "**", ""(空文字) など)
    pub path: String,

    /// loadChildren で指定されたモジュール参照の文字列をそのまま格納
    /// 例: "./admin/admin.module"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// リンク後、reference が解決されたファイル。
    /// 複数のレコードが同じファイルを指すことがあるので、リンク後は読み取り専用として扱う
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<FileId>,
}

impl RouteRecord {
    /// `{ path, component }` 形式の末端ルート
    pub fn component(path: impl Into<String>) -> Self {
        RouteRecord {
            path: path.into(),
            reference: None,
            children: None,
        }
    }

    /// `{ path, loadChildren }` 形式のファイル間参照
    pub fn lazy(path: impl Into<String>, reference: impl Into<String>) -> Self {
        RouteRecord {
            path: path.into(),
            reference: Some(reference.into()),
            children: None,
        }
    }
}

/// ルート宣言を 1 件以上含むルーティングファイル
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteFile {
    /// ソースディレクトリからの相対パス ("/" 区切り)
    pub identifier: String,
    /// 抽出順のルート宣言
    pub records: Vec<RouteRecord>,
}

/// ファイル識別子 → ルート宣言列。入力順を保持する
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub files: Vec<RouteFile>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// レコードが 1 件もないファイルは登録しない
    pub fn insert(&mut self, identifier: impl Into<String>, records: Vec<RouteRecord>) {
        if records.is_empty() {
            return;
        }
        self.files.push(RouteFile {
            identifier: identifier.into(),
            records,
        });
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file(&self, id: FileId) -> &RouteFile {
        &self.files[id.0]
    }

    pub fn identifiers(&self) -> Vec<String> {
        self.files.iter().map(|f| f.identifier.clone()).collect()
    }
}

/// リンク済みの Document と、どのファイルからも参照されなかったルートファイルの一覧
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Forest {
    pub document: Document,
    pub roots: Vec<FileId>,
}

impl Forest {
    pub fn file(&self, id: FileId) -> &RouteFile {
        self.document.file(id)
    }

    /// ルートとして残ったファイル (Document の挿入順)
    pub fn root_files(&self) -> impl Iterator<Item = (FileId, &RouteFile)> {
        self.roots.iter().map(|&id| (id, self.file(id)))
    }

    pub fn root_identifiers(&self) -> Vec<&str> {
        self.root_files().map(|(_, f)| f.identifier.as_str()).collect()
    }
}
