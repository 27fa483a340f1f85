//! End-to-end tests: OpenDRIVE text in, ordered map-builder calls out.

use std::io::Write;

use proptest::prelude::*;
use xodr::{
    Call, CallRecorder, CubicPolynomial, Document, Error, ParseOptions, RoadErrorKind, RoadParser,
    parse_str,
};

fn calls_for(xml: &str) -> Vec<Call> {
    let mut recorder = CallRecorder::new();
    parse_str(xml, &mut recorder).expect("document should parse");
    recorder.into_calls()
}

fn lane_call(road_id: i32, section_index: usize, lane_id: i32, lane_type: &str) -> Call {
    Call::AddRoadSectionLane {
        road_id,
        section_index,
        lane_id,
        lane_type: lane_type.to_string(),
        level: false,
        predecessor: 0,
        successor: 0,
    }
}

// ============================================================================
// Scenario
// ============================================================================

const MAIN_ROAD: &str = r#"<?xml version="1.0" standalone="yes"?>
<OpenDRIVE>
  <header revMajor="1" revMinor="4"/>
  <road id="1" name="Main" length="100.0" junction="-1">
    <planView><geometry s="0" x="0" y="0" hdg="0" length="100"><line/></geometry></planView>
    <type s="0" type="town"><speed max="50" unit="mph"/></type>
    <lanes>
      <laneOffset s="0" a="0" b="0" c="0" d="0"/>
      <laneSection s="0">
        <left><lane id="1" type="driving"/></left>
        <center><lane id="0" type="none"/></center>
        <right><lane id="-1" type="driving"/></right>
      </laneSection>
    </lanes>
  </road>
</OpenDRIVE>"#;

#[test]
fn test_single_road_scenario() {
    let calls = calls_for(MAIN_ROAD);

    assert_eq!(
        calls,
        vec![
            Call::AddRoad {
                id: 1,
                name: "Main".to_string(),
                length: 100.0,
                junction_id: -1,
                predecessor: -1,
                successor: -1,
            },
            Call::SetRoadTypeSpeed {
                road_id: 1,
                s: 0.0,
                road_type: "town".to_string(),
                max_speed: 50.0,
                unit: "mph".to_string(),
            },
            Call::AddRoadSection {
                road_id: 1,
                polynomial: CubicPolynomial {
                    a: 0.0,
                    b: 0.0,
                    c: 0.0,
                    d: 0.0,
                    s: 0.0,
                },
            },
            lane_call(1, 0, 1, "driving"),
            lane_call(1, 0, -1, "driving"),
        ]
    );
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_roads_emitted_in_document_order() {
    let calls = calls_for(
        r#"<OpenDRIVE>
             <road id="30"/>
             <road id="4"/>
             <road id="17"/>
             <road id="4"/>
           </OpenDRIVE>"#,
    );

    let ids: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::AddRoad { id, .. } => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(ids, vec![30, 4, 17, 4]);
}

#[test]
fn test_sections_pair_with_offsets_by_position() {
    let calls = calls_for(
        r#"<OpenDRIVE>
             <road id="1" length="60">
               <lanes>
                 <laneOffset s="0" a="1" b="0.1" c="0.01" d="0.001"/>
                 <laneOffset s="10" a="2" b="0.2" c="0.02" d="0.002"/>
                 <laneOffset s="20" a="3" b="0.3" c="0.03" d="0.003"/>
                 <laneSection s="0"/>
                 <laneSection s="15"/>
                 <laneSection s="45"/>
               </lanes>
             </road>
           </OpenDRIVE>"#,
    );

    let polynomials: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::AddRoadSection { polynomial, .. } => Some(*polynomial),
            _ => None,
        })
        .collect();

    assert_eq!(
        polynomials,
        vec![
            CubicPolynomial { a: 1.0, b: 0.1, c: 0.01, d: 0.001, s: 0.0 },
            CubicPolynomial { a: 2.0, b: 0.2, c: 0.02, d: 0.002, s: 15.0 },
            CubicPolynomial { a: 3.0, b: 0.3, c: 0.03, d: 0.003, s: 45.0 },
        ]
    );
}

#[test]
fn test_call_sequence_per_road() {
    let calls = calls_for(
        r#"<OpenDRIVE>
             <road id="1">
               <type s="0" type="town"/>
               <type s="5" type="rural"/>
               <lanes>
                 <laneOffset s="0"/>
                 <laneOffset s="5"/>
                 <laneSection s="0"><right><lane id="-1"/></right></laneSection>
                 <laneSection s="5"><left><lane id="1"/></left><right><lane id="-1"/></right></laneSection>
               </lanes>
             </road>
           </OpenDRIVE>"#,
    );

    let shape: Vec<_> = calls
        .iter()
        .map(|c| match c {
            Call::AddRoad { .. } => "road".to_string(),
            Call::SetRoadTypeSpeed { road_type, .. } => format!("type:{road_type}"),
            Call::AddRoadSection { polynomial, .. } => format!("section@{}", polynomial.s),
            Call::AddRoadSectionLane { section_index, lane_id, .. } => {
                format!("lane:{section_index}:{lane_id}")
            }
        })
        .collect();

    assert_eq!(
        shape,
        vec![
            "road",
            "type:town",
            "type:rural",
            "section@0",
            "lane:0:-1",
            "section@5",
            "lane:1:1",
            "lane:1:-1",
        ]
    );
}

#[test]
fn test_lane_merge_left_then_right_without_center() {
    let calls = calls_for(
        r#"<OpenDRIVE>
             <road id="9">
               <lanes>
                 <laneOffset s="0"/>
                 <laneSection s="0">
                   <right><lane id="-1"/><lane id="-2"/></right>
                   <center><lane id="0"/></center>
                   <left><lane id="2"/><lane id="1"/></left>
                 </laneSection>
               </lanes>
             </road>
           </OpenDRIVE>"#,
    );

    let lane_ids: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::AddRoadSectionLane { lane_id, .. } => Some(*lane_id),
            _ => None,
        })
        .collect();
    assert_eq!(lane_ids, vec![2, 1, -1, -2]);
}

#[test]
fn test_center_lanes_never_emitted_from_side_groups() {
    let calls = calls_for(
        r#"<OpenDRIVE>
             <road id="4">
               <lanes>
                 <laneOffset s="0"/>
                 <laneSection s="0">
                   <left><lane id="0" type="none"/><lane type="driving"/></left>
                   <right><lane id="-1"/></right>
                 </laneSection>
               </lanes>
             </road>
           </OpenDRIVE>"#,
    );

    let lane_ids: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::AddRoadSectionLane { lane_id, .. } => Some(*lane_id),
            _ => None,
        })
        .collect();
    assert_eq!(lane_ids, vec![-1]);
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_defaults_for_missing_links_and_speed() {
    let calls = calls_for(
        r#"<OpenDRIVE>
             <road id="5" name="Side" length="12">
               <type s="0" type="rural"/>
               <lanes>
                 <laneOffset s="0"/>
                 <laneSection s="0"><right><lane id="-1"/></right></laneSection>
               </lanes>
             </road>
           </OpenDRIVE>"#,
    );

    assert_eq!(
        calls[0],
        Call::AddRoad {
            id: 5,
            name: "Side".to_string(),
            length: 12.0,
            junction_id: -1,
            predecessor: -1,
            successor: -1,
        }
    );
    assert_eq!(
        calls[1],
        Call::SetRoadTypeSpeed {
            road_id: 5,
            s: 0.0,
            road_type: "rural".to_string(),
            max_speed: 0.0,
            unit: String::new(),
        }
    );
    assert_eq!(calls[3], lane_call(5, 0, -1, "none"));
}

#[test]
fn test_links_and_level_pass_through() {
    let calls = calls_for(
        r#"<OpenDRIVE>
             <road id="2" junction="100">
               <link>
                 <predecessor elementType="road" elementId="1" contactPoint="end"/>
                 <successor elementType="road" elementId="3" contactPoint="start"/>
               </link>
               <lanes>
                 <laneOffset s="0"/>
                 <laneSection s="0">
                   <right>
                     <lane id="-1" type="driving" level="true">
                       <link><predecessor id="-2"/><successor id="-1"/></link>
                     </lane>
                   </right>
                 </laneSection>
               </lanes>
             </road>
           </OpenDRIVE>"#,
    );

    assert!(matches!(
        calls[0],
        Call::AddRoad { id: 2, junction_id: 100, predecessor: 1, successor: 3, .. }
    ));
    assert_eq!(
        calls[2],
        Call::AddRoadSectionLane {
            road_id: 2,
            section_index: 0,
            lane_id: -1,
            lane_type: "driving".to_string(),
            level: true,
            predecessor: -2,
            successor: -1,
        }
    );
}

#[test]
fn test_absent_junction_reads_as_not_in_junction() {
    let calls = calls_for(r#"<OpenDRIVE><road id="1"/></OpenDRIVE>"#);
    assert!(matches!(calls[0], Call::AddRoad { junction_id: -1, .. }));
}

// ============================================================================
// Errors
// ============================================================================

const MISMATCH_THEN_GOOD: &str = r#"<OpenDRIVE>
  <road id="1" name="Broken" length="20">
    <type s="0" type="town"/>
    <lanes>
      <laneOffset s="0"/>
      <laneSection s="0"><right><lane id="-1"/></right></laneSection>
      <laneSection s="10"><right><lane id="-1"/></right></laneSection>
    </lanes>
  </road>
  <road id="2" name="Fine" length="20">
    <lanes>
      <laneOffset s="0" a="3.5"/>
      <laneSection s="0"><right><lane id="-1" type="driving"/></right></laneSection>
    </lanes>
  </road>
</OpenDRIVE>"#;

#[test]
fn test_mismatched_road_is_isolated() {
    let mut recorder = CallRecorder::new();
    let report = parse_str(MISMATCH_THEN_GOOD, &mut recorder).unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].road_id, 1);
    assert_eq!(
        report.skipped[0].kind,
        RoadErrorKind::ExhaustedQueue {
            section_index: 1,
            declared_offsets: 1,
        }
    );

    let calls = recorder.into_calls();
    assert!(calls.iter().all(|c| match c {
        Call::AddRoad { id, .. } => *id == 2,
        Call::SetRoadTypeSpeed { road_id, .. }
        | Call::AddRoadSection { road_id, .. }
        | Call::AddRoadSectionLane { road_id, .. } => *road_id == 2,
    }));
    assert_eq!(
        calls,
        vec![
            Call::AddRoad {
                id: 2,
                name: "Fine".to_string(),
                length: 20.0,
                junction_id: -1,
                predecessor: -1,
                successor: -1,
            },
            Call::AddRoadSection {
                road_id: 2,
                polynomial: CubicPolynomial { a: 3.5, b: 0.0, c: 0.0, d: 0.0, s: 0.0 },
            },
            lane_call(2, 0, -1, "driving"),
        ]
    );
}

#[test]
fn test_strict_mode_names_offending_road() {
    let doc = Document::parse(MISMATCH_THEN_GOOD).unwrap();
    let parser = RoadParser::with_options(ParseOptions { strict: true });
    let mut recorder = CallRecorder::new();

    let err = parser.parse(&doc, &mut recorder).unwrap_err();
    assert!(err.to_string().contains("road 1"), "got: {err}");
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_missing_root_emits_nothing() {
    let mut recorder = CallRecorder::new();
    let err = parse_str(r#"<OpenSCENARIO><road id="1"/></OpenSCENARIO>"#, &mut recorder).unwrap_err();
    assert!(matches!(err, Error::MissingRoot));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_not_well_formed_is_an_error() {
    let mut recorder = CallRecorder::new();
    assert!(parse_str("<OpenDRIVE><road id=\"1\"></OpenDRIVE>", &mut recorder).is_err());
    assert!(recorder.calls().is_empty());
}

// ============================================================================
// Re-parse and file loading
// ============================================================================

#[test]
fn test_reparse_is_identical() {
    let doc = Document::parse(MISMATCH_THEN_GOOD).unwrap();
    let parser = RoadParser::new();

    let mut first = CallRecorder::new();
    let mut second = CallRecorder::new();
    let first_report = parser.parse(&doc, &mut first).unwrap();
    let second_report = parser.parse(&doc, &mut second).unwrap();

    assert_eq!(first.calls(), second.calls());
    assert_eq!(first_report, second_report);
}

#[test]
fn test_open_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MAIN_ROAD.as_bytes()).unwrap();

    let doc = Document::open(file.path()).unwrap();
    let mut recorder = CallRecorder::new();
    RoadParser::new().parse(&doc, &mut recorder).unwrap();
    assert_eq!(recorder.into_calls(), calls_for(MAIN_ROAD));
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Document::open(dir.path().join("missing.xodr")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

// ============================================================================
// Properties
// ============================================================================

fn lanes_xml(ids: &[i32]) -> String {
    ids.iter().map(|id| format!(r#"<lane id="{id}"/>"#)).collect()
}

proptest! {
    #[test]
    fn prop_lane_merge_order(
        left in prop::collection::vec(0i32..50, 0..6),
        right in prop::collection::vec(-50i32..=0, 0..6),
    ) {
        let xml = format!(
            r#"<OpenDRIVE><road id="1"><lanes><laneOffset s="0"/><laneSection s="0">
                 <left>{}</left><center><lane id="0"/></center><right>{}</right>
               </laneSection></lanes></road></OpenDRIVE>"#,
            lanes_xml(&left),
            lanes_xml(&right),
        );

        let emitted: Vec<i32> = calls_for(&xml)
            .iter()
            .filter_map(|c| match c {
                Call::AddRoadSectionLane { lane_id, .. } => Some(*lane_id),
                _ => None,
            })
            .collect();

        let expected: Vec<i32> = left.iter().chain(right.iter()).copied().filter(|&id| id != 0).collect();
        prop_assert!(!emitted.contains(&0));
        prop_assert_eq!(emitted, expected);
    }

    #[test]
    fn prop_offsets_pair_by_index(
        coefficients in prop::collection::vec(-100i32..100, 1..8),
        extra_offsets in 0usize..3,
    ) {
        let offsets: String = coefficients
            .iter()
            .chain(std::iter::repeat_n(&999, extra_offsets))
            .enumerate()
            .map(|(i, a)| format!(r#"<laneOffset s="{i}" a="{a}" b="{i}"/>"#))
            .collect();
        let sections: String = (0..coefficients.len())
            .map(|i| format!(r#"<laneSection s="{}"/>"#, i * 10))
            .collect();
        let xml = format!(
            r#"<OpenDRIVE><road id="1"><lanes>{offsets}{sections}</lanes></road></OpenDRIVE>"#
        );

        let polynomials: Vec<CubicPolynomial> = calls_for(&xml)
            .iter()
            .filter_map(|c| match c {
                Call::AddRoadSection { polynomial, .. } => Some(*polynomial),
                _ => None,
            })
            .collect();

        prop_assert_eq!(polynomials.len(), coefficients.len());
        for (i, (poly, a)) in polynomials.iter().zip(&coefficients).enumerate() {
            prop_assert_eq!(poly.a, f64::from(*a));
            prop_assert_eq!(poly.b, i as f64);
            prop_assert_eq!(poly.s, (i * 10) as f64);
        }
    }
}
