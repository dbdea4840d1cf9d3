//! Standard XMP namespace tables
//!
//! Field tables for the namespaces that commonly appear in image, PDF and
//! media packets. Fields not listed here are still indexed by the parser when
//! they carry attributes, but their text values are skipped.

use crate::core::namespace::Namespace;
use crate::types::{ArrayFieldType as A, FieldType, ScalarFieldType as S};

/// Standard namespace URIs and prefixes
pub mod ns {
    /// RDF namespace
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// Adobe meta wrapper namespace (`x:xmpmeta`)
    pub const X: &str = "adobe:ns:meta/";
    /// XML namespace (for xml:lang)
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    /// Dublin Core namespace
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    /// XMP Basic namespace
    pub const XMP: &str = "http://ns.adobe.com/xap/1.0/";
    /// XMP Media Management namespace
    pub const XMP_MM: &str = "http://ns.adobe.com/xap/1.0/mm/";
    /// XMP Rights namespace
    pub const XMP_RIGHTS: &str = "http://ns.adobe.com/xap/1.0/rights/";
    /// XMP Basic Job Ticket namespace
    pub const XMP_BJ: &str = "http://ns.adobe.com/xap/1.0/bj/";
    /// XMP Paged-Text namespace
    pub const XMP_TPG: &str = "http://ns.adobe.com/xap/1.0/t/pg/";
    /// XMP Dynamic Media namespace
    pub const XMP_DM: &str = "http://ns.adobe.com/xmp/1.0/DynamicMedia/";
    /// XMP Graphics namespace
    pub const XMP_G: &str = "http://ns.adobe.com/xap/1.0/g/";
    /// XMP Image namespace
    pub const XMP_G_IMG: &str = "http://ns.adobe.com/xap/1.0/g/img/";
    /// XMP Identifier qualifier namespace
    pub const XMP_IDQ: &str = "http://ns.adobe.com/xmp/Identifier/qual/1.0/";
    /// Photoshop namespace
    pub const PHOTOSHOP: &str = "http://ns.adobe.com/photoshop/1.0/";
    /// PDF namespace
    pub const PDF: &str = "http://ns.adobe.com/pdf/1.3/";
    /// ResourceEvent structure namespace
    pub const ST_EVT: &str = "http://ns.adobe.com/xap/1.0/sType/ResourceEvent#";
    /// ResourceRef structure namespace
    pub const ST_REF: &str = "http://ns.adobe.com/xap/1.0/sType/ResourceRef#";
    /// Dimensions structure namespace
    pub const ST_DIM: &str = "http://ns.adobe.com/xap/1.0/sType/Dimensions#";
    /// Font structure namespace
    pub const ST_FNT: &str = "http://ns.adobe.com/xap/1.0/sType/Font#";
    /// Job structure namespace
    pub const ST_JOB: &str = "http://ns.adobe.com/xap/1.0/sType/Job#";
    /// Version structure namespace
    pub const ST_VER: &str = "http://ns.adobe.com/xap/1.0/sType/Version#";
    /// Microsoft Photo namespace
    pub const MICROSOFT_PHOTO: &str = "http://ns.microsoft.com/photo/1.0/";
    /// Elpical Claro namespace
    pub const CLARO: &str = "http://www.elpical.com/claro/synt1.0/";

    pub const RDF_PREFIX: &str = "rdf";
    pub const X_PREFIX: &str = "x";
    pub const XML_PREFIX: &str = "xml";
    pub const DC_PREFIX: &str = "dc";
    pub const XMP_PREFIX: &str = "xmp";
    pub const XMP_MM_PREFIX: &str = "xmpMM";
    pub const XMP_RIGHTS_PREFIX: &str = "xmpRights";
    pub const XMP_BJ_PREFIX: &str = "xmpBJ";
    pub const XMP_TPG_PREFIX: &str = "xmpTPg";
    pub const XMP_DM_PREFIX: &str = "xmpDM";
    pub const XMP_G_PREFIX: &str = "xmpG";
    pub const XMP_G_IMG_PREFIX: &str = "xmpGImg";
    pub const XMP_IDQ_PREFIX: &str = "xmpidq";
    pub const PHOTOSHOP_PREFIX: &str = "photoshop";
    pub const PDF_PREFIX: &str = "pdf";
    pub const ST_EVT_PREFIX: &str = "stEvt";
    pub const ST_REF_PREFIX: &str = "stRef";
    pub const ST_DIM_PREFIX: &str = "stDim";
    pub const ST_FNT_PREFIX: &str = "stFnt";
    pub const ST_JOB_PREFIX: &str = "stJob";
    pub const ST_VER_PREFIX: &str = "stVer";
    pub const MICROSOFT_PHOTO_PREFIX: &str = "MicrosoftPhoto";
    pub const CLARO_PREFIX: &str = "claro";
}

fn text_fields<'a>(names: &'a [&'a str]) -> impl Iterator<Item = (&'a str, FieldType)> + 'a {
    names.iter().map(|name| (*name, FieldType::Scalar(S::Text)))
}

fn core() -> Vec<Namespace> {
    vec![
        Namespace::new(ns::RDF, ns::RDF_PREFIX),
        Namespace::new(ns::X, ns::X_PREFIX),
        Namespace::new(ns::XML, ns::XML_PREFIX).with_field("lang", S::Locale),
        Namespace::new(ns::DC, ns::DC_PREFIX)
            .with_field("contributor", A::UnorderedText)
            .with_field("coverage", S::Text)
            .with_field("creator", A::OrderedText)
            .with_field("date", A::OrderedText)
            .with_field("description", A::LanguageAlternative)
            .with_field("format", S::MimeType)
            .with_field("identifier", S::Text)
            .with_field("language", A::UnorderedText)
            .with_field("publisher", A::UnorderedText)
            .with_field("relation", A::UnorderedText)
            .with_field("rights", A::LanguageAlternative)
            .with_field("source", S::Text)
            .with_field("subject", A::UnorderedText)
            .with_field("title", A::LanguageAlternative)
            .with_field("type", A::UnorderedText),
        Namespace::new(ns::XMP, ns::XMP_PREFIX)
            .with_field("BaseURL", S::Url)
            .with_field("CreateDate", S::Date)
            .with_field("CreatorTool", S::AgentName)
            .with_field("Identifier", A::UnorderedText)
            .with_field("Label", S::Text)
            .with_field("MetadataDate", S::Date)
            .with_field("ModifyDate", S::Date)
            .with_field("Nickname", S::Text)
            .with_field("Rating", S::Real)
            .with_field("Thumbnails", A::Alternative),
        Namespace::new(ns::XMP_MM, ns::XMP_MM_PREFIX)
            .with_field("DocumentID", S::Guid)
            .with_field("History", A::OrderedResourceEvent)
            .with_field("Ingredients", A::Unordered)
            .with_field("InstanceID", S::Guid)
            .with_field("Manager", S::AgentName)
            .with_field("ManageTo", S::Uri)
            .with_field("ManageUI", S::Uri)
            .with_field("ManagerVariant", S::Text)
            .with_field("OriginalDocumentID", S::Guid)
            .with_field("Pantry", A::Unordered)
            .with_field("RenditionClass", S::RenditionClass)
            .with_field("RenditionParams", S::Text)
            .with_field("VersionID", S::Text)
            .with_field("Versions", A::Ordered),
        Namespace::new(ns::XMP_RIGHTS, ns::XMP_RIGHTS_PREFIX)
            .with_field("Certificate", S::Url)
            .with_field("Marked", S::Boolean)
            .with_field("Owner", A::UnorderedText)
            .with_field("UsageTerms", A::LanguageAlternative)
            .with_field("WebStatement", S::Url),
        Namespace::new(ns::XMP_BJ, ns::XMP_BJ_PREFIX).with_field("JobRef", A::Unordered),
        Namespace::new(ns::XMP_TPG, ns::XMP_TPG_PREFIX)
            .with_field("Colorants", A::Ordered)
            .with_field("Fonts", A::Unordered)
            .with_field("HasVisibleOverprint", S::Boolean)
            .with_field("HasVisibleTransparency", S::Boolean)
            .with_field("NPages", S::Integer)
            .with_field("PlateNames", A::OrderedText),
        Namespace::new(ns::XMP_IDQ, ns::XMP_IDQ_PREFIX).with_field("Scheme", S::Text),
    ]
}

fn structures() -> Vec<Namespace> {
    vec![
        Namespace::new(ns::ST_EVT, ns::ST_EVT_PREFIX)
            .with_field("action", S::Text)
            .with_field("changed", S::Text)
            .with_field("instanceID", S::Guid)
            .with_field("parameters", S::Text)
            .with_field("softwareAgent", S::AgentName)
            .with_field("when", S::Date),
        Namespace::new(ns::ST_REF, ns::ST_REF_PREFIX)
            .with_field("alternatePaths", A::OrderedUri)
            .with_field("documentID", S::Uri)
            .with_field("filePath", S::Uri)
            .with_field("fromPart", S::Part)
            .with_field("instanceID", S::Uri)
            .with_field("lastModifyDate", S::Date)
            .with_field("manager", S::AgentName)
            .with_field("managerVariant", S::Text)
            .with_field("manageTo", S::Uri)
            .with_field("manageUI", S::Uri)
            .with_field("maskMarkers", S::closed_choice(&["All", "None"]))
            .with_field("partMapping", S::Text)
            .with_field("renditionClass", S::RenditionClass)
            .with_field("renditionParams", S::Text)
            .with_field("toPart", S::Part)
            .with_field("versionID", S::Text),
        Namespace::new(ns::ST_DIM, ns::ST_DIM_PREFIX)
            .with_field("h", S::Real)
            .with_field("w", S::Real)
            .with_field(
                "unit",
                S::open_choice(&["inch", "mm", "pixel", "pica", "point"]),
            ),
        Namespace::new(ns::ST_FNT, ns::ST_FNT_PREFIX)
            .with_field("composite", S::Boolean)
            .with_fields(text_fields(&[
                "fontFace",
                "fontFamily",
                "fontFileName",
                "fontName",
                "fontType",
                "versionString",
            ])),
        Namespace::new(ns::ST_JOB, ns::ST_JOB_PREFIX)
            .with_field("id", S::Text)
            .with_field("name", S::Text)
            .with_field("url", S::Url),
        Namespace::new(ns::ST_VER, ns::ST_VER_PREFIX)
            .with_field("comments", S::Text)
            .with_field("event", S::Text)
            .with_field("modifier", S::ProperName)
            .with_field("modifyDate", S::Date)
            .with_field("version", S::Text),
    ]
}

fn media() -> Vec<Namespace> {
    vec![
        Namespace::new(ns::XMP_G, ns::XMP_G_PREFIX)
            .with_field("A", S::Integer)
            .with_field("B", S::Integer)
            .with_field("L", S::Real)
            .with_field("black", S::Real)
            .with_field("cyan", S::Real)
            .with_field("magenta", S::Real)
            .with_field("yellow", S::Real)
            .with_field("red", S::Integer)
            .with_field("green", S::Integer)
            .with_field("blue", S::Integer)
            .with_field("mode", S::closed_choice(&["CMYK", "RGB", "LAB"]))
            .with_field("type", S::closed_choice(&["PROCESS", "SPOT"]))
            .with_field("swatchName", S::Text),
        Namespace::new(ns::XMP_G_IMG, ns::XMP_G_IMG_PREFIX)
            .with_field("format", S::closed_choice(&["JPEG"]))
            .with_field("height", S::Integer)
            .with_field("width", S::Integer)
            .with_field("image", S::Text),
        Namespace::new(ns::XMP_DM, ns::XMP_DM_PREFIX)
            .with_field("absPeakAudioFilePath", S::Uri)
            .with_field("audioSampleRate", S::Integer)
            .with_field("fileDataRate", S::Rational)
            .with_field("frameOverlappingPercentage", S::Real)
            .with_field("frameRate", S::FrameRate)
            .with_field("frameSize", S::Real)
            .with_field("good", S::Boolean)
            .with_field("location", S::Uri)
            .with_field("managed", S::Boolean)
            .with_field("path", S::Uri)
            .with_field("probability", S::Real)
            .with_field(
                "quality",
                S::closed_choice(&["High", "Medium", "Low"]),
            )
            .with_field("riseInDecibel", S::Real)
            .with_field("scale", S::Rational)
            .with_field(
                "timeFormat",
                S::closed_choice(&[
                    "24Timecode",
                    "25Timecode",
                    "2997DropTimecode",
                    "2997NonDropTimecode",
                    "30Timecode",
                    "50Timecode",
                    "5994DropTimecode",
                    "5994NonDropTimecode",
                    "60Timecode",
                    "23976Timecode",
                ]),
            )
            .with_field("type", S::open_choice(&["Cue", "Beat", "Track", "Index"]))
            .with_field("useFileBeatsMarker", S::Boolean)
            .with_field("webStatement", S::Uri)
            .with_fields(text_fields(&[
                "album",
                "altTapeName",
                "artist",
                "audioChannelType",
                "audioCompressor",
                "audioSampleType",
                "cameraAngle",
                "cameraLabel",
                "cameraModel",
                "cameraMove",
                "client",
                "comment",
                "composer",
                "cuePointType",
                "director",
                "directorPhotography",
                "engineer",
                "genre",
                "instrument",
                "key",
                "name",
                "speaker",
                "target",
                "timeValue",
                "track",
                "trackName",
            ])),
        Namespace::new(ns::PHOTOSHOP, ns::PHOTOSHOP_PREFIX)
            .with_field("AncestorID", S::Uri)
            .with_field(
                "ColorMode",
                S::closed_choice(&["0", "1", "2", "3", "4", "7", "8", "9"]),
            )
            .with_field("DateCreated", S::Date)
            .with_field("DocumentAncestors", A::UnorderedAncestor)
            .with_field("SupplementalCategories", A::UnorderedText)
            .with_field("Urgency", S::Integer)
            .with_fields(text_fields(&[
                "AuthorsPosition",
                "CaptionWriter",
                "Category",
                "City",
                "Country",
                "Credit",
                "Headline",
                "History",
                "ICCProfile",
                "Instructions",
                "LayerName",
                "LayerText",
                "Source",
                "State",
                "TransmissionReference",
            ])),
    ]
}

fn vendors() -> Vec<Namespace> {
    vec![
        Namespace::new(ns::PDF, ns::PDF_PREFIX)
            .with_field("Keywords", S::Text)
            .with_field("PDFVersion", S::Text)
            .with_field("Producer", S::AgentName)
            .with_field("Trapped", S::Boolean),
        Namespace::new(ns::MICROSOFT_PHOTO, ns::MICROSOFT_PHOTO_PREFIX)
            .with_field("CameraSerialNumber", S::Text)
            .with_field("DateAcquired", S::Date)
            .with_field("FlashManufacturer", S::Text)
            .with_field("FlashModel", S::Text)
            .with_field("LastKeywordIPTC", A::UnorderedText)
            .with_field("LastKeywordXMP", A::UnorderedText)
            .with_field("LensManufacturer", S::Text)
            .with_field("LensModel", S::Text)
            .with_field("Rating", S::Integer),
        Namespace::new(ns::CLARO, ns::CLARO_PREFIX).with_field("Logging", A::OrderedText),
    ]
}

/// Every standard namespace table
pub fn standard_namespaces() -> Vec<Namespace> {
    let mut namespaces = core();
    namespaces.extend(structures());
    namespaces.extend(media());
    namespaces.extend(vendors());
    namespaces
}
