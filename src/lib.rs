pub mod core;
pub mod analysis;
pub mod index;
pub mod storage;
pub mod search;

/*
┌────────────────────────────────────────────────────────────────────────────┐
│                        TRIEDEX STRUCT ARCHITECTURE                          │
└────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────── BUILD SIDE ───────────────────────────────┐
│                                                                             │
│  ┌──────────────────────────┐      ┌──────────────────────────────────┐   │
│  │ struct IndexBuilder      │      │ struct Trie                      │   │
│  │ • config: IndexConfig    │─────>│ • nodes: Vec<Node>  (arena,      │   │
│  │ • tokenizer: Box<dyn>    │      │   position = NodeId, 0 = root)   │   │
│  │ • trie: Trie             │      │ • insert / contains /            │   │
│  │ • registry: FileRegistry │      │   files_for_word /               │   │
│  └──────────────────────────┘      │   words_with_prefix / find_node  │   │
│              │ commit()            └──────────────────────────────────┘   │
│              v                                                             │
│  ┌──────────────────────────┐      ┌──────────────────────────────────┐   │
│  │ struct TrieWriter        │      │ struct Node                      │   │
│  │ • <prefix>.index         │      │ • children: BTreeMap<u8, NodeId> │   │
│  │   node count + offsets   │      │ • files: RoaringBitmap           │   │
│  │ • <prefix>.data          │      └──────────────────────────────────┘   │
│  │   node records, arena    │                                             │
│  │   order, LE u32 fields   │      record: children_count, files_count,   │
│  └──────────────────────────┘      (label u8, child u32)*, (doc u32)*     │
└─────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────── QUERY SIDE ───────────────────────────────┐
│                                                                             │
│  ┌──────────────────────────┐      ┌──────────────────────────────────┐   │
│  │ struct Searcher          │      │ struct StreamedTrie              │   │
│  │ • trie: StreamedTrie     │─────>│ • offsets: Arc<[u32]> (resident) │   │
│  │ • registry: FileRegistry │      │ • data_file: File (seek + read)  │   │
│  │   doc ids -> paths       │      │ • cached: Option<(NodeId, Node)> │   │
│  └──────────────────────────┘      │   single slot, one record loaded │   │
│                                    │   per character transition       │   │
│                                    └──────────────────────────────────┘   │
└─────────────────────────────────────────────────────────────────────────────┘

IndexBuilder ──walks──> storage::walker ──paths──> FileRegistry (doc id = line)
IndexBuilder ──text──> analysis::DelimiterTokenizer ──distinct words──> Trie
Searcher ──prefix──> StreamedTrie ──doc ids──> FileRegistry ──paths──> caller
*/
