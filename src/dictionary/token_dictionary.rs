use std::{
    fs::{
        self,
        File,
    },
    io::{
        self,
        BufReader,
        BufWriter,
    },
    path::{
        Path,
        PathBuf,
    },
};

use liblzma::read::XzDecoder;
use serde::{
    Deserialize,
    Serialize,
};
use tar::Archive;
use vibrato::Dictionary;
use zstd::stream::copy_decode;

use crate::{
    core::{
        http::{
            download_to_file,
            http_client,
        },
        YomireiError,
    },
    persistence::get_app_data_dir,
};

const LICENSE_FILES: [&str; 4] = ["BSD", "NOTICE", "COPYING", "LICENSE"];

fn get_tokenizer_dict_dir() -> PathBuf {
    get_app_data_dir().join("dictionaries").join("tokenizer")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DictType {
    #[default]
    Unidic,
    Ipadic,
}

impl DictType {
    fn url(&self) -> &str {
        match self {
            DictType::Unidic => {
                "https://github.com/daac-tools/vibrato/releases/download/v0.5.0/bccwj-suw+unidic-cwj-3_1_1.tar.xz"
            }
            DictType::Ipadic => {
                "https://github.com/daac-tools/vibrato/releases/download/v0.5.0/ipadic-mecab-2_7_0.tar.xz"
            }
        }
    }

    fn folder_name(&self) -> &str {
        match self {
            DictType::Unidic => "bccwj-suw+unidic-cwj-3_1_1",
            DictType::Ipadic => "ipadic-mecab-2_7_0",
        }
    }

    /// Position of the katakana reading in a token's comma-separated features.
    /// Unknown words are emitted with a short feature list that stops before it.
    pub fn reading_index(&self) -> usize {
        match self {
            DictType::Unidic => 20,
            DictType::Ipadic => 7,
        }
    }
}

fn cleanup_files(folder_path: &Path, keep_files: &[&str]) -> Result<(), YomireiError> {
    let keep_paths: Vec<PathBuf> = keep_files.iter().map(|f| folder_path.join(f)).collect();
    tracing::debug!("Cleaning up intermediate files in {:?}", folder_path);

    for entry in fs::read_dir(folder_path).map_err(|e| {
        YomireiError::Custom(format!("Failed to read directory during cleanup: {}", e))
    })? {
        let path = entry
            .map_err(|e| {
                YomireiError::Custom(format!("Failed to get directory entry during cleanup: {}", e))
            })?
            .path();

        if keep_paths.contains(&path) {
            continue;
        }

        let removed = if path.is_dir() { fs::remove_dir_all(&path) } else { fs::remove_file(&path) };
        removed.map_err(|e| {
            YomireiError::Custom(format!("Failed to remove {:?} during cleanup: {}", path, e))
        })?;
    }

    Ok(())
}

/// Returns the path of a ready `system.dic` for `dict_type`, downloading and
/// unpacking the release archive on first use. Blocking.
pub fn ensure_dictionary(dict_type: &DictType) -> Result<PathBuf, YomireiError> {
    let url = dict_type.url();
    let folder_name = dict_type.folder_name();
    let dict_dir = get_tokenizer_dict_dir();
    let extract_path = dict_dir.join(folder_name);
    let final_dic_path = extract_path.join("system.dic");

    if final_dic_path.exists() {
        tracing::info!("Tokenizer dictionary already provisioned at {:?}", final_dic_path);
        return Ok(final_dic_path);
    }

    fs::create_dir_all(&dict_dir).map_err(|e| {
        YomireiError::Custom(format!("Failed to create dictionary directory {:?}: {}", dict_dir, e))
    })?;

    // Leftovers from an interrupted attempt
    let download_path = dict_dir.join(format!("{}.tar.xz", folder_name));
    let tar_path = dict_dir.join(format!("{}.tar", folder_name));
    fs::remove_file(&download_path).ok();
    fs::remove_file(&tar_path).ok();
    fs::remove_dir_all(&extract_path).ok();

    tracing::info!("Downloading tokenizer dictionary from {}", url);
    let client = http_client()?;
    download_to_file(&client, url, &download_path)?;

    let metadata = download_path.metadata()?;
    if metadata.len() == 0 {
        return Err(YomireiError::Custom(format!(
            "Downloaded file {:?} is empty. Check your internet connection.",
            download_path
        )));
    }

    tracing::info!("Extracting tokenizer dictionary");
    let tar_xz_file = File::open(&download_path)?;
    let mut tar_file = File::create(&tar_path)?;
    let mut xz_decoder = XzDecoder::new(BufReader::new(tar_xz_file));
    io::copy(&mut xz_decoder, &mut tar_file).map_err(|e| {
        YomireiError::Custom(format!(
            "Failed to decompress XZ to TAR: {}. Possible corrupt download.",
            e
        ))
    })?;

    let tar_file = File::open(&tar_path)?;
    let mut archive = Archive::new(BufReader::new(tar_file));
    archive.unpack(&extract_path).map_err(|e| {
        YomireiError::Custom(format!("Failed to unpack TAR to {:?}: {}.", extract_path, e))
    })?;

    let inner_path = extract_path.join(folder_name);
    let zst_path = inner_path.join("system.dic.zst");
    if !zst_path.exists() {
        return Err(YomireiError::Custom(format!(
            "ZST file not found at {:?} after extraction.",
            zst_path
        )));
    }

    let zst_file = File::open(&zst_path)?;
    let dic_file = File::create(&final_dic_path)?;
    copy_decode(BufReader::new(zst_file), BufWriter::new(dic_file)).map_err(|e| {
        YomireiError::Custom(format!("Failed to decompress ZST to {:?}: {}.", final_dic_path, e))
    })?;

    let mut keep_files = vec!["system.dic"];
    for license in LICENSE_FILES {
        let source = inner_path.join(license);
        if source.exists() {
            fs::rename(&source, extract_path.join(license))?;
            keep_files.push(license);
        }
    }

    cleanup_files(&extract_path, &keep_files)?;
    fs::remove_file(&download_path)?;
    fs::remove_file(&tar_path)?;

    tracing::info!("Tokenizer dictionary ready at {:?}", final_dic_path);
    Ok(final_dic_path)
}

pub fn load_dictionary(path: &Path) -> Result<Dictionary, YomireiError> {
    let reader = BufReader::new(File::open(path).map_err(|e| {
        YomireiError::Custom(format!("Failed to open dictionary {:?}: {}", path, e))
    })?);
    let dict = Dictionary::read(reader)?;
    Ok(dict)
}
