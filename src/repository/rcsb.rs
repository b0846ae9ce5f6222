use serde_json::Value;

#[cfg(feature = "net")]
use crate::error::MolscopeError;
use crate::metadata::ProteinMetadata;
#[cfg(feature = "net")]
use crate::options::RepositoryOptions;

/// Download URL for the structure file of `id`.
#[must_use]
pub fn structure_file_url(base: &str, id: &str) -> String {
    format!(
        "{}/{}.pdb",
        base.trim_end_matches('/'),
        id.trim().to_uppercase()
    )
}

/// REST URL for the entry record of `id`.
#[must_use]
pub fn metadata_url(base: &str, id: &str) -> String {
    format!(
        "{}/core/entry/{}",
        base.trim_end_matches('/'),
        id.trim().to_uppercase()
    )
}

fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

fn u64_at(value: &Value, pointer: &str) -> u64 {
    value.pointer(pointer).and_then(Value::as_u64).unwrap_or(0)
}

/// Map an RCSB core entry document to a [`ProteinMetadata`].
///
/// Missing fields fall back instead of failing: text to `"Unknown"` (organism
/// to `"N/A"`), counts and weight to 0, resolution to `None`. RCSB reports
/// molecular weight in kilodaltons; the record stores daltons.
#[must_use]
pub fn metadata_from_json(id: &str, data: &Value) -> ProteinMetadata {
    let resolution = data
        .pointer("/rcsb_entry_info/resolution_combined/0")
        .and_then(Value::as_f64)
        .or_else(|| {
            data.pointer("/refine/0/ls_d_res_high")
                .and_then(Value::as_f64)
        });
    let molecular_weight_kda = data
        .pointer("/rcsb_entry_info/molecular_weight")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    ProteinMetadata {
        structure_id: str_at(data, "/rcsb_id")
            .map_or_else(|| id.trim().to_uppercase(), str::to_owned),
        title: str_at(data, "/struct/title").unwrap_or("Unknown").to_owned(),
        experimental_method: str_at(data, "/exptl/0/method")
            .unwrap_or("Unknown")
            .to_owned(),
        resolution,
        organism: str_at(
            data,
            "/rcsb_entity_source_organism/0/ncbi_scientific_name",
        )
        .unwrap_or("N/A")
        .to_owned(),
        release_date: str_at(data, "/rcsb_accession_info/initial_release_date")
            .unwrap_or("Unknown")
            .to_owned(),
        molecular_weight: molecular_weight_kda * 1000.0,
        atom_count: u64_at(data, "/rcsb_entry_info/deposited_atom_count"),
        residue_count: u64_at(
            data,
            "/rcsb_entry_info/deposited_polymer_monomer_count",
        ),
        chain_count: u64_at(
            data,
            "/rcsb_entry_info/deposited_polymer_entity_instance_count",
        ),
    }
}

#[cfg(feature = "net")]
const USER_AGENT: &str = concat!("molscope/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the RCSB PDB file and data services.
#[cfg(feature = "net")]
pub struct RcsbClient {
    agent: ureq::Agent,
    options: RepositoryOptions,
}

#[cfg(feature = "net")]
impl RcsbClient {
    /// Client using `options` endpoints and timeout.
    #[must_use]
    pub fn new(options: RepositoryOptions) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(std::time::Duration::from_secs(
                options.timeout_secs,
            )))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            options,
        }
    }

    /// GET `url`; 404 becomes `NotFound(not_found)`, any other failure
    /// becomes `Network`.
    fn get(
        &self,
        url: &str,
        not_found: impl FnOnce() -> String,
    ) -> Result<ureq::http::Response<ureq::Body>, MolscopeError> {
        let response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| MolscopeError::Network(format!("{url}: {e}")))?;
        let status = response.status().as_u16();
        if status == 404 {
            return Err(MolscopeError::NotFound(not_found()));
        }
        if status >= 400 {
            return Err(MolscopeError::Network(format!(
                "HTTP error {status}: {url}"
            )));
        }
        Ok(response)
    }
}

#[cfg(feature = "net")]
impl Default for RcsbClient {
    fn default() -> Self {
        Self::new(RepositoryOptions::default())
    }
}

#[cfg(feature = "net")]
impl super::StructureRepository for RcsbClient {
    fn fetch_structure_file(&self, id: &str) -> Result<String, MolscopeError> {
        let id = id.trim().to_uppercase();
        let url = structure_file_url(&self.options.structure_file_url, &id);
        log::info!("Downloading {id} from RCSB...");
        self.get(&url, || format!("structure file not found: {id}"))?
            .into_body()
            .with_config()
            .limit(self.options.max_download_bytes)
            .read_to_string()
            .map_err(|e| {
                MolscopeError::Network(format!("failed to read response: {e}"))
            })
    }

    fn fetch_metadata(&self, id: &str) -> Result<ProteinMetadata, MolscopeError> {
        let id = id.trim().to_uppercase();
        let url = metadata_url(&self.options.metadata_api_url, &id);
        log::debug!("GET {url}");
        let data: Value = self
            .get(&url, || format!("metadata not found: {id}"))?
            .into_body()
            .read_json()
            .map_err(|e| {
                MolscopeError::Network(format!("invalid metadata response: {e}"))
            })?;
        Ok(metadata_from_json(&id, &data))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn urls_are_uppercased() {
        assert_eq!(
            structure_file_url("https://files.rcsb.org/download", " 1crn "),
            "https://files.rcsb.org/download/1CRN.pdb"
        );
        assert_eq!(
            metadata_url("https://data.rcsb.org/rest/v1/", "4ins"),
            "https://data.rcsb.org/rest/v1/core/entry/4INS"
        );
    }

    #[test]
    fn full_entry_maps_every_field() {
        let data = json!({
            "rcsb_id": "1CRN",
            "struct": { "title": "WATER STRUCTURE OF A HYDROPHOBIC PROTEIN" },
            "exptl": [{ "method": "X-RAY DIFFRACTION" }],
            "rcsb_entry_info": {
                "resolution_combined": [1.5],
                "molecular_weight": 4.73,
                "deposited_atom_count": 327,
                "deposited_polymer_monomer_count": 46,
                "deposited_polymer_entity_instance_count": 1
            },
            "refine": [{ "ls_d_res_high": 9.9 }],
            "rcsb_entity_source_organism": [
                { "ncbi_scientific_name": "Crambe hispanica subsp. abyssinica" }
            ],
            "rcsb_accession_info": { "initial_release_date": "1981-04-30T00:00:00+0000" }
        });
        let m = metadata_from_json("1crn", &data);
        assert_eq!(m.structure_id, "1CRN");
        assert_eq!(m.title, "WATER STRUCTURE OF A HYDROPHOBIC PROTEIN");
        assert_eq!(m.experimental_method, "X-RAY DIFFRACTION");
        assert_eq!(m.resolution, Some(1.5));
        assert_eq!(m.organism, "Crambe hispanica subsp. abyssinica");
        assert_eq!(m.release_date, "1981-04-30T00:00:00+0000");
        assert!((m.molecular_weight - 4730.0).abs() < 1e-6);
        assert_eq!(m.atom_count, 327);
        assert_eq!(m.residue_count, 46);
        assert_eq!(m.chain_count, 1);
    }

    #[test]
    fn resolution_falls_back_to_refine() {
        let data = json!({ "refine": [{ "ls_d_res_high": 2.1 }] });
        assert_eq!(metadata_from_json("1abc", &data).resolution, Some(2.1));
    }

    #[test]
    fn empty_document_uses_fallbacks() {
        let m = metadata_from_json("2pcx", &json!({}));
        assert_eq!(m.structure_id, "2PCX");
        assert_eq!(m.title, "Unknown");
        assert_eq!(m.experimental_method, "Unknown");
        assert_eq!(m.resolution, None);
        assert_eq!(m.organism, "N/A");
        assert_eq!(m.release_date, "Unknown");
        assert_eq!(m.molecular_weight, 0.0);
        assert_eq!(m.atom_count, 0);
        assert_eq!(m.residue_count, 0);
        assert_eq!(m.chain_count, 0);
    }

    #[cfg(feature = "net")]
    mod http {
        use std::io::{BufRead, BufReader, Write};
        use std::net::TcpListener;

        use super::*;
        use crate::repository::StructureRepository;

        /// Serve each `(status, body)` to one connection in turn and return
        /// the base URL.
        fn serve(responses: Vec<(u16, Vec<u8>)>) -> String {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            let _ = std::thread::spawn(move || {
                for (status, body) in responses {
                    let Ok((mut stream, _)) = listener.accept() else {
                        return;
                    };
                    let mut reader = BufReader::new(stream.try_clone().unwrap());
                    let mut line = String::new();
                    while reader.read_line(&mut line).is_ok_and(|n| n > 2) {
                        line.clear();
                    }
                    let head = format!(
                        "HTTP/1.1 {status} OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    let _ = stream.write_all(head.as_bytes());
                    let _ = stream.write_all(&body);
                }
            });
            format!("http://{addr}")
        }

        fn client(base: &str, max_download_bytes: u64) -> RcsbClient {
            RcsbClient::new(RepositoryOptions {
                structure_file_url: base.to_owned(),
                metadata_api_url: base.to_owned(),
                timeout_secs: 10,
                max_download_bytes,
            })
        }

        #[test]
        fn structure_file_larger_than_ten_mebibytes_downloads() {
            let body = b"ATOM      1  N   THR A   1      17.047  14.099   3.625\n"
                .repeat(220_000);
            assert!(body.len() > 10 * 1024 * 1024);
            let base = serve(vec![(200, body.clone())]);
            let client = client(&base, RepositoryOptions::default().max_download_bytes);
            let text = client.fetch_structure_file("big1").unwrap();
            assert_eq!(text.len(), body.len());
        }

        #[test]
        fn structure_file_over_configured_limit_is_network_error() {
            let base = serve(vec![(200, vec![b'A'; 4096])]);
            let err = client(&base, 1024).fetch_structure_file("1crn").unwrap_err();
            assert!(matches!(err, MolscopeError::Network(_)), "{err}");
        }

        #[test]
        fn missing_entry_is_not_found() {
            let base = serve(vec![(404, Vec::new())]);
            let err = client(&base, 1024).fetch_metadata("9zzz").unwrap_err();
            assert!(matches!(err, MolscopeError::NotFound(_)), "{err}");
            assert_eq!(err.to_string(), "metadata not found: 9ZZZ");
        }
    }
}
